//! 行選択（単一行ハイライト）

/// 選択中の行インデックス
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RowSelection {
    selected: Option<usize>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 行を選択し、直前に選択されていた行を返す
    pub fn select(&mut self, index: usize) -> Option<usize> {
        self.selected.replace(index)
    }

    pub fn clear(&mut self) -> Option<usize> {
        self.selected.take()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_selection() {
        let mut selection = RowSelection::new();
        assert_eq!(selection.select(2), None);
        assert_eq!(selection.select(5), Some(2));
        assert!(selection.is_selected(5));
        assert!(!selection.is_selected(2));
    }

    #[test]
    fn test_clear() {
        let mut selection = RowSelection::new();
        selection.select(1);
        assert_eq!(selection.clear(), Some(1));
        assert_eq!(selection.selected(), None);
    }
}
