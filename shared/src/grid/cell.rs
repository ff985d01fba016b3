//! Sparse grid cell store
//!
//! Cells are keyed by spreadsheet-style ids (`"B12"` is column B, row 12).
//! Absent keys behave as an empty cell with default style. The store owns a
//! single-slot clipboard; each copy or cut overwrites the previous snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a cell
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Visual styling of a cell
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CellStyle {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u8>,
}

/// A single grid cell. `formula` is present iff the value was derived from
/// an expression the operator typed starting with `=`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GridCell {
    pub value: String,
    #[serde(default)]
    pub style: CellStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

/// Value + style snapshot held in the clipboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CellSnapshot {
    pub value: String,
    pub style: CellStyle,
}

/// Partial update merged into a cell by [`Grid::set`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CellPatch {
    pub value: Option<String>,
    pub style: Option<StylePatch>,
}

/// Partial style update; only the fields present are applied
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StylePatch {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub align: Option<Align>,
    pub font_size: Option<u8>,
}

impl StylePatch {
    fn apply(&self, style: &mut CellStyle) {
        if let Some(bold) = self.bold {
            style.bold = bold;
        }
        if let Some(italic) = self.italic {
            style.italic = italic;
        }
        if let Some(underline) = self.underline {
            style.underline = underline;
        }
        if let Some(color) = &self.color {
            style.color = Some(color.clone());
        }
        if let Some(background) = &self.background_color {
            style.background_color = Some(background.clone());
        }
        if let Some(align) = self.align {
            style.align = Some(align);
        }
        if let Some(size) = self.font_size {
            style.font_size = Some(size);
        }
    }
}

/// Sparse mapping from cell id to cell, plus the clipboard slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: HashMap<String, GridCell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clipboard: Option<CellSnapshot>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell at `id`, or the empty default when absent
    pub fn get(&self, id: &str) -> GridCell {
        self.cells.get(id).cloned().unwrap_or_default()
    }

    /// Raw stored value at `id` ("" when absent)
    pub fn value(&self, id: &str) -> String {
        self.cells.get(id).map(|c| c.value.clone()).unwrap_or_default()
    }

    /// Merge a partial update into the cell, creating it if absent
    pub fn set(&mut self, id: &str, patch: CellPatch) {
        let cell = self.cells.entry(id.to_string()).or_default();
        if let Some(value) = patch.value {
            cell.value = value;
            cell.formula = None;
        }
        if let Some(style) = patch.style {
            style.apply(&mut cell.style);
        }
    }

    pub(crate) fn store(&mut self, id: &str, cell: GridCell) {
        self.cells.insert(id.to_string(), cell);
    }

    /// Reset the cell to empty value and default style
    pub fn clear(&mut self, id: &str) {
        if let Some(cell) = self.cells.get_mut(id) {
            *cell = GridCell::default();
        }
    }

    /// Snapshot the cell into the clipboard, overwriting any previous slot
    pub fn copy(&mut self, id: &str) -> CellSnapshot {
        let cell = self.get(id);
        let snapshot = CellSnapshot {
            value: cell.value,
            style: cell.style,
        };
        self.clipboard = Some(snapshot.clone());
        snapshot
    }

    /// Copy, then clear the source cell
    pub fn cut(&mut self, id: &str) -> CellSnapshot {
        let snapshot = self.copy(id);
        self.clear(id);
        snapshot
    }

    /// Overwrite the cell from the clipboard; returns false when empty
    pub fn paste(&mut self, id: &str) -> bool {
        match self.clipboard.clone() {
            Some(snapshot) => {
                self.cells.insert(
                    id.to_string(),
                    GridCell {
                        value: snapshot.value,
                        style: snapshot.style,
                        formula: None,
                    },
                );
                true
            }
            None => false,
        }
    }

    pub fn clipboard(&self) -> Option<&CellSnapshot> {
        self.clipboard.as_ref()
    }

    /// Ids of occupied cells, unordered
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Format a 1-based (column, row) pair as a cell id (`(2, 12)` -> `"B12"`)
pub fn format_cell_id(col: u32, row: u32) -> String {
    format!("{}{}", column_letters(col), row)
}

/// Parse a cell id into a 1-based (column, row) pair. Rejects anything that
/// is not uppercase letters immediately followed by a positive row number.
pub fn parse_cell_id(id: &str) -> Option<(u32, u32)> {
    let split = id.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = id.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((letters_to_column(letters)?, row))
}

fn column_letters(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        col -= 1;
        letters.push(b'A' + (col % 26) as u8);
        col /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

fn letters_to_column(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0u32, |acc, c| {
        acc.checked_mul(26)?.checked_add(c as u32 - 'A' as u32 + 1)
    })
}
