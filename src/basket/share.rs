//! Sharing a list. On a terminal the closest thing to a share sheet is the
//! clipboard, so [`share`] hands the text to the platform clipboard tool.

use crate::error::{BasketError, Result};
use crate::model::ShoppingList;
use std::io::Write;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
}

impl ShareRequest {
    /// Title is the list name; the text lists every item still to buy.
    pub fn for_list(list: &ShoppingList) -> Self {
        let mut text = format!("Check out my shopping list: {}", list.name);
        for item in list.items.iter().filter(|item| !item.purchased) {
            text.push_str("\n- ");
            text.push_str(&item.name);
            let qty = item.effective_quantity();
            if qty > 1 {
                text.push_str(&format!(" x{}", qty));
            }
        }
        Self {
            title: list.name.clone(),
            text,
        }
    }

    /// What lands on the clipboard: title, blank line, text.
    pub fn clipboard_text(&self) -> String {
        format!("{}\n\n{}", self.title, self.text)
    }
}

/// Copies the request to the system clipboard.
/// - macOS: pbcopy
/// - Linux: wl-copy, then xclip, then xsel
/// - Windows: clip.exe
pub fn share(request: &ShareRequest) -> Result<()> {
    let text = request.clipboard_text();

    #[cfg(target_os = "macos")]
    {
        pipe_to("pbcopy", &[], &text)
    }

    #[cfg(target_os = "linux")]
    {
        pipe_to("wl-copy", &[], &text)
            .or_else(|_| pipe_to("xclip", &["-selection", "clipboard"], &text))
            .or_else(|_| pipe_to("xsel", &["--clipboard", "--input"], &text))
            .map_err(|e| {
                BasketError::Api(format!(
                    "{}. Install wl-clipboard, xclip or xsel to share lists.",
                    e
                ))
            })
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to("clip", &[], &text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(BasketError::Api(
            "Sharing is not supported on this platform".to_string(),
        ))
    }
}

#[allow(dead_code)]
fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| BasketError::Api(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| BasketError::Api(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| BasketError::Api(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(BasketError::Api(format!("{} exited with error", program)))
    }
}
