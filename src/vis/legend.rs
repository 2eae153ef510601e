use crate::conflict::ConflictModel;

use super::highlight::HighlightKey;

pub const HEADER_ROWS: usize = 2;
pub const HEADER_COLUMNS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Corner,
    Header,
    /// Decision maker label spanning its option rows.
    Group,
    /// Slot covered by a group cell above it.
    Covered,
    OptionName,
    StateHeader,
    Value,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendCell {
    pub kind: CellKind,
    pub text: String,
    pub row_span: usize,
    pub keys: Vec<HighlightKey>,
}

impl LegendCell {
    fn new(kind: CellKind, text: impl Into<String>, keys: Vec<HighlightKey>) -> Self {
        Self {
            kind,
            text: text.into(),
            row_span: 1,
            keys,
        }
    }

    fn corner() -> Self {
        Self::new(CellKind::Corner, "", Vec::new())
    }

    fn covered() -> Self {
        Self {
            row_span: 0,
            ..Self::new(CellKind::Covered, "", Vec::new())
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendMatrix {
    rows: Vec<Vec<LegendCell>>,
}

impl LegendMatrix {
    pub fn rows(&self) -> &[Vec<LegendCell>] {
        &self.rows
    }

    #[cfg(test)]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[cfg(test)]
    pub fn cell(&self, row: usize, column: usize) -> Option<&LegendCell> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }
}

pub fn build_matrix(model: &ConflictModel) -> LegendMatrix {
    let option_count = model.options().len();
    let row_count = HEADER_ROWS + option_count;
    let column_count = HEADER_COLUMNS + model.node_count();

    let mut rows = (0..row_count)
        .map(|_| Vec::with_capacity(column_count))
        .collect::<Vec<_>>();

    rows[0].push(LegendCell::corner());
    rows[1].push(LegendCell::corner());
    rows[0].push(LegendCell::new(CellKind::Header, "Ordered", Vec::new()));
    rows[1].push(LegendCell::new(CellKind::Header, "Decimal", Vec::new()));

    let mut group_column = vec![LegendCell::corner(); option_count];
    let mut offset = 0usize;
    for decision_maker in model.decision_makers() {
        let span = decision_maker
            .options
            .len()
            .min(option_count.saturating_sub(offset));
        if span == 0 {
            continue;
        }
        group_column[offset] = LegendCell {
            row_span: span,
            ..LegendCell::new(CellKind::Group, decision_maker.name.clone(), Vec::new())
        };
        for covered in &mut group_column[offset + 1..offset + span] {
            *covered = LegendCell::covered();
        }
        offset += span;
    }

    for (option_index, (option, group_cell)) in
        model.options().iter().zip(group_column).enumerate()
    {
        let row = &mut rows[HEADER_ROWS + option_index];
        row.push(group_cell);
        row.push(LegendCell::new(
            CellKind::OptionName,
            option.name.clone(),
            vec![HighlightKey::Option(option_index)],
        ));
    }

    for node in model.nodes() {
        let state_key = HighlightKey::State(node.id);
        rows[0].push(LegendCell::new(
            CellKind::StateHeader,
            node.ordered_label.clone(),
            vec![state_key],
        ));
        rows[1].push(LegendCell::new(
            CellKind::StateHeader,
            node.decimal_label.clone(),
            vec![state_key],
        ));
        for option_index in 0..option_count {
            let value = node.state.get(option_index).cloned().unwrap_or_default();
            rows[HEADER_ROWS + option_index].push(LegendCell::new(
                CellKind::Value,
                value,
                vec![HighlightKey::Option(option_index), state_key],
            ));
        }
    }

    LegendMatrix { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::NodeId;
    use crate::conflict::fixtures::{chain, three_party, two_cycle};

    #[test]
    fn shape_is_headers_plus_options_by_headers_plus_states() {
        for model in [chain(), two_cycle(), three_party()] {
            let matrix = build_matrix(&model);
            assert_eq!(matrix.row_count(), 2 + model.options().len());
            assert_eq!(matrix.column_count(), 2 + model.node_count());
            assert!(matrix.rows().iter().all(|row| row.len() == matrix.column_count()));
        }
    }

    #[test]
    fn value_cells_carry_option_and_state_keys() {
        let matrix = build_matrix(&chain());
        let cell = matrix.cell(2 + 1, 2 + 2).expect("cell exists");

        assert_eq!(cell.kind, CellKind::Value);
        assert_eq!(cell.text, "Y");
        assert_eq!(
            cell.keys,
            [HighlightKey::Option(1), HighlightKey::State(NodeId(2))]
        );
    }

    #[test]
    fn state_headers_carry_only_the_state_key() {
        let matrix = build_matrix(&chain());
        let ordered = matrix.cell(0, 3).expect("cell exists");
        let decimal = matrix.cell(1, 3).expect("cell exists");

        assert_eq!(ordered.text, "2");
        assert_eq!(decimal.text, "1");
        assert_eq!(ordered.keys, [HighlightKey::State(NodeId(1))]);
        assert_eq!(decimal.keys, [HighlightKey::State(NodeId(1))]);
        assert_eq!(matrix.cell(0, 1).map(|c| c.text.as_str()), Some("Ordered"));
        assert_eq!(matrix.cell(1, 1).map(|c| c.text.as_str()), Some("Decimal"));
    }

    #[test]
    fn option_names_carry_option_key() {
        let matrix = build_matrix(&chain());
        let cell = matrix.cell(2, 1).expect("cell exists");
        assert_eq!(cell.kind, CellKind::OptionName);
        assert_eq!(cell.text, "attack");
        assert_eq!(cell.keys, [HighlightKey::Option(0)]);
    }

    #[test]
    fn decision_makers_span_their_option_rows() {
        let matrix = build_matrix(&three_party());
        let group_column = matrix
            .rows()
            .iter()
            .skip(HEADER_ROWS)
            .map(|row| (row[0].kind, row[0].text.as_str(), row[0].row_span))
            .collect::<Vec<_>>();

        assert_eq!(
            group_column,
            [
                (CellKind::Group, "Alpha", 2),
                (CellKind::Covered, "", 0),
                (CellKind::Group, "Gamma", 3),
                (CellKind::Covered, "", 0),
                (CellKind::Covered, "", 0),
            ]
        );
    }
}
