/// System clipboard access, used to copy the result locator.
pub struct ClipboardService;

impl ClipboardService {
    pub fn copy(text: &str) -> Result<(), String> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| e.to_string())
    }
}
