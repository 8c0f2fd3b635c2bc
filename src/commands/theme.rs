//! Theme preference commands

use crate::cli::ThemeCommand;
use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::theme::{load_theme, save_theme, toggle_theme, Theme};
use colored::Colorize;

/// Handle `theme` subcommands; no subcommand prints the saved theme
pub fn handle_theme(storage: &dyn KeyValueStore, command: Option<ThemeCommand>) -> Result<Theme> {
    let theme = match command.unwrap_or(ThemeCommand::Get) {
        ThemeCommand::Get => load_theme(storage)?,
        ThemeCommand::Set { theme } => {
            save_theme(storage, theme)?;
            theme
        }
        ThemeCommand::Toggle => toggle_theme(storage)?,
    };

    println!("Theme: {}", theme.as_str().bold());
    Ok(theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_handle_theme_flow() {
        let storage = MemoryStore::new();
        assert_eq!(handle_theme(&storage, None).unwrap(), Theme::Light);
        assert_eq!(
            handle_theme(&storage, Some(ThemeCommand::Toggle)).unwrap(),
            Theme::Dark
        );
        assert_eq!(
            handle_theme(&storage, Some(ThemeCommand::Get)).unwrap(),
            Theme::Dark
        );
        assert_eq!(
            handle_theme(
                &storage,
                Some(ThemeCommand::Set {
                    theme: Theme::Light
                })
            )
            .unwrap(),
            Theme::Light
        );
    }
}
