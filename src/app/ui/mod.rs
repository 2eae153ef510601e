mod controls;
mod legend;
