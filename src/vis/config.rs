use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("tree depth {depth} is outside the supported range {min}..={max}")]
    DepthOutOfRange { depth: u8, min: u8, max: u8 },
}

/// Recursion bound for the move tree. Always within `MIN..=MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TreeDepth(u8);

impl TreeDepth {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 6;

    pub fn new(depth: u8) -> Result<Self, ConfigError> {
        if (Self::MIN..=Self::MAX).contains(&depth) {
            Ok(Self(depth))
        } else {
            Err(ConfigError::DepthOutOfRange {
                depth,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn clamped(depth: u8) -> Self {
        Self(depth.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for TreeDepth {
    fn default() -> Self {
        Self(3)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectorShape {
    #[default]
    Line,
    Arc,
}

impl ConnectorShape {
    pub fn label(self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Arc => "Arc",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeConfig {
    pub depth: TreeDepth,
    pub show_only_uis: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphConfig {
    pub show_only_uis: bool,
    pub style_non_uis: bool,
    pub connector_shape: ConnectorShape,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisConfig {
    pub tree: TreeConfig,
    pub graph: GraphConfig,
}
