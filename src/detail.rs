// Detail view state for a single cat, independent of any UI toolkit

use crate::error::{CatalogError, Result};
use crate::model::Cat;

/// Exit signal of the detail view, handed back to the list for reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailOutcome {
    pub position: usize,
    pub adopted: bool,
}

/// A cat opened from the list, plus the visibility of its adopt confirmation.
/// Works on its own copy of the cat; the list only learns about changes via `exit`.
#[derive(Debug, Clone)]
pub struct CatDetail {
    position: usize,
    cat: Cat,
    confirm_open: bool,
}

impl CatDetail {
    pub fn open(position: usize, cats: &[Cat]) -> Result<Self> {
        let cat = cats
            .get(position)
            .cloned()
            .ok_or(CatalogError::MissingRecord(position))?;

        Ok(CatDetail {
            position,
            cat,
            confirm_open: false,
        })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn cat(&self) -> &Cat {
        &self.cat
    }

    pub fn is_confirm_open(&self) -> bool {
        self.confirm_open
    }

    /// Adopt button pressed. The button is disabled once the cat is adopted.
    pub fn request_adopt(&mut self) {
        if !self.cat.adopted {
            self.confirm_open = true;
        }
    }

    /// "Yes" in the confirm dialog
    pub fn confirm(&mut self) {
        if self.confirm_open {
            self.confirm_open = false;
            self.cat.adopted = true;
        }
    }

    /// "No" in the confirm dialog, or the dialog dismissed
    pub fn dismiss(&mut self) {
        self.confirm_open = false;
    }

    pub fn exit(&self) -> DetailOutcome {
        DetailOutcome {
            position: self.position,
            adopted: self.cat.adopted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats() -> Vec<Cat> {
        let mut misty = Cat::new("Misty", "misty", "Persian");
        misty.adopted = true;
        vec![
            Cat::new("Tom", "tom", "Grey tabby"),
            Cat::new("Luna", "luna", "Black cat"),
            misty,
        ]
    }

    #[test]
    fn test_open_missing_position() {
        let result = CatDetail::open(3, &cats());
        assert!(matches!(result, Err(CatalogError::MissingRecord(3))));
    }

    #[test]
    fn test_exit_without_adopting() {
        let detail = CatDetail::open(1, &cats()).unwrap();

        assert_eq!(detail.cat().name, "Luna");
        assert_eq!(
            detail.exit(),
            DetailOutcome {
                position: 1,
                adopted: false
            }
        );
    }

    #[test]
    fn test_confirm_adopts_and_closes_dialog() {
        let mut detail = CatDetail::open(0, &cats()).unwrap();

        detail.request_adopt();
        assert!(detail.is_confirm_open());

        detail.confirm();
        assert!(!detail.is_confirm_open());
        assert!(detail.cat().adopted);
        assert_eq!(
            detail.exit(),
            DetailOutcome {
                position: 0,
                adopted: true
            }
        );
    }

    #[test]
    fn test_dismiss_keeps_cat_unadopted() {
        let mut detail = CatDetail::open(0, &cats()).unwrap();

        detail.request_adopt();
        detail.dismiss();

        assert!(!detail.is_confirm_open());
        assert!(!detail.exit().adopted);
    }

    #[test]
    fn test_confirm_without_dialog_does_nothing() {
        let mut detail = CatDetail::open(1, &cats()).unwrap();
        detail.confirm();
        assert!(!detail.cat().adopted);
    }

    #[test]
    fn test_already_adopted_never_opens_dialog() {
        let mut detail = CatDetail::open(2, &cats()).unwrap();

        detail.request_adopt();

        assert!(!detail.is_confirm_open());
        assert_eq!(
            detail.exit(),
            DetailOutcome {
                position: 2,
                adopted: true
            }
        );
    }

    #[test]
    fn test_detail_does_not_touch_list() {
        let list = cats();
        let mut detail = CatDetail::open(0, &list).unwrap();

        detail.request_adopt();
        detail.confirm();

        assert!(!list[0].adopted);
    }
}
