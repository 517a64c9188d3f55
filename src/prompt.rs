//! The fixed styling prompt sent with every portrait.

use std::path::Path;

/// Describes the fashion shot the service should produce from the portrait.
pub const FASHION_PROMPT: &str = "\
Generate a high-end fashion portrait of the man in the attached photo.
He must have the exact same facial features and identity as the person in the provided image.
He is wearing a stylish, modern high-fashion outfit: a tailored dark velvet blazer, a crisp premium white shirt, and a classic wide-brimmed cowboy kofia (hat) with a decorative leather band.
His pose is confident and sophisticated, suitable for a fashion magazine cover.
The setting is a cinematic urban backdrop during golden hour, with soft, directional lighting that emphasizes his facial structure and the textures of his clothing.
Ultra-realistic, 8k resolution, cinematic lighting, sharp focus, fashion magazine aesthetic.";

/// Resolve the styling prompt: a prompt file replaces the built-in one.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains only whitespace.
pub fn resolve_prompt(prompt_file: Option<&Path>) -> Result<String, std::io::Error> {
    let Some(path) = prompt_file else {
        return Ok(FASHION_PROMPT.to_string());
    };
    let text = std::fs::read_to_string(path)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Prompt file {} is empty", path.display()),
        ));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompt() {
        let prompt = resolve_prompt(None).unwrap();
        assert_eq!(prompt, FASHION_PROMPT);
        assert!(prompt.contains("velvet blazer"));
        assert!(prompt.contains("cowboy kofia"));
    }

    #[test]
    fn prompt_file_overrides() {
        let dir = std::env::temp_dir().join("vogue_ai_prompt_file_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prompt.txt");
        std::fs::write(&path, "  a trench coat and fedora\n").unwrap();

        assert_eq!(resolve_prompt(Some(&path)).unwrap(), "a trench coat and fedora");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_prompt_file_errors() {
        let dir = std::env::temp_dir().join("vogue_ai_prompt_empty_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prompt.txt");
        std::fs::write(&path, "   \n").unwrap();

        assert!(resolve_prompt(Some(&path)).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_prompt_file_errors() {
        assert!(resolve_prompt(Some(Path::new("/nonexistent/prompt.txt"))).is_err());
    }
}
