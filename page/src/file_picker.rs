//! Single-file selection for the resume upload zone.

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME types the picker accepts, as reported by the browser.
pub const ACCEPTED_MIME_TYPES: [&str; 2] = [PDF_MIME, DOCX_MIME];

pub const INVALID_TYPE_MESSAGE: &str = "Please select a valid PDF or DOCX file.";

/// Name and browser-reported type of a chosen file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub mime: String,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
        }
    }

    /// Only the MIME string is checked; contents and extension are not.
    pub fn is_accepted(&self) -> bool {
        ACCEPTED_MIME_TYPES.contains(&self.mime.as_str())
    }
}

/// Result of a drop or a manual selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Accepted(FileMeta),
    Rejected(FileMeta),
    /// No file was offered.
    Ignored,
}

/// What the upload zone should look like.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickerView {
    pub dragging: bool,
    /// `Some` shows the selected-file summary in place of the drop zone.
    pub file_name: Option<String>,
}

#[derive(Debug, Default)]
pub struct FilePicker {
    selected: Option<FileMeta>,
    dragging: bool,
}

impl FilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&FileMeta> {
        self.selected.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Handle a drop. A rejected drop keeps the previous selection.
    pub fn drop_files(&mut self, files: &[FileMeta]) -> Selection {
        self.dragging = false;
        let Some(first) = files.first() else {
            return Selection::Ignored;
        };
        if first.is_accepted() {
            self.selected = Some(first.clone());
            Selection::Accepted(first.clone())
        } else {
            Selection::Rejected(first.clone())
        }
    }

    /// Handle a change of the file input. A rejected choice empties the selection.
    pub fn choose(&mut self, files: &[FileMeta]) -> Selection {
        let Some(first) = files.first() else {
            return Selection::Ignored;
        };
        if first.is_accepted() {
            self.selected = Some(first.clone());
            Selection::Accepted(first.clone())
        } else {
            self.selected = None;
            Selection::Rejected(first.clone())
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn view(&self) -> PickerView {
        PickerView {
            dragging: self.dragging,
            file_name: self.selected.as_ref().map(|f| f.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> FileMeta {
        FileMeta::new(name, PDF_MIME)
    }

    #[test]
    fn test_accepts_pdf_and_docx_only() {
        assert!(pdf("cv.pdf").is_accepted());
        assert!(FileMeta::new("cv.docx", DOCX_MIME).is_accepted());
        assert!(!FileMeta::new("cv.doc", "application/msword").is_accepted());
        assert!(!FileMeta::new("cv.pdf", "").is_accepted());
        assert!(!FileMeta::new("cv.txt", "text/plain").is_accepted());
    }

    #[test]
    fn test_drop_takes_first_file_only() {
        let mut picker = FilePicker::new();
        let files = [pdf("a.pdf"), pdf("b.pdf")];
        assert_eq!(picker.drop_files(&files), Selection::Accepted(pdf("a.pdf")));
        assert_eq!(picker.view().file_name.as_deref(), Some("a.pdf"));
    }

    #[test]
    fn test_rejected_drop_keeps_previous_selection() {
        let mut picker = FilePicker::new();
        picker.choose(&[pdf("keep.pdf")]);
        picker.drag_over();

        let result = picker.drop_files(&[FileMeta::new("x.png", "image/png")]);
        assert!(matches!(result, Selection::Rejected(_)));
        assert_eq!(picker.selected(), Some(&pdf("keep.pdf")));
        assert!(!picker.is_dragging());
    }

    #[test]
    fn test_rejected_choice_clears_selection() {
        let mut picker = FilePicker::new();
        picker.choose(&[pdf("old.pdf")]);
        picker.choose(&[FileMeta::new("x.png", "image/png")]);
        assert!(!picker.has_file());
        assert_eq!(picker.view(), PickerView::default());
    }

    #[test]
    fn test_empty_offer_is_ignored() {
        let mut picker = FilePicker::new();
        picker.choose(&[pdf("cv.pdf")]);
        assert_eq!(picker.choose(&[]), Selection::Ignored);
        assert_eq!(picker.drop_files(&[]), Selection::Ignored);
        assert!(picker.has_file());
    }
}
