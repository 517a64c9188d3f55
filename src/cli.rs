//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

/// Turn a portrait photo into a high-end fashion magazine shot.
#[derive(Parser, Debug)]
#[command(name = "vogue-ai", version, about)]
pub struct Cli {
    /// Portrait image to upload (JPEG, PNG or WEBP; 5MB or less recommended),
    /// or a `data:` URI holding one.
    pub image: PathBuf,

    /// Directory the generated image is saved to [default: config or current dir].
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Model name or short alias [default: config or nano-banana].
    #[arg(short, long)]
    pub model: Option<String>,

    /// Output aspect ratio [default: config or 3:4].
    #[arg(short, long)]
    pub aspect_ratio: Option<String>,

    /// File whose contents replace the built-in styling prompt.
    #[arg(short = 'p', long)]
    pub prompt_file: Option<PathBuf>,

    /// Also save the original and generated images side by side.
    #[arg(long)]
    pub side_by_side: bool,

    /// Print the generated image to stdout as a `data:` URI.
    #[arg(long)]
    pub data_uri: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The image argument when it is a `data:` URI rather than a path.
    #[must_use]
    pub fn inline_image(&self) -> Option<&str> {
        self.image.to_str().filter(|s| s.starts_with("data:"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_image() {
        let cli = Cli::parse_from(["vogue-ai", "me.jpg"]);
        assert_eq!(cli.image, PathBuf::from("me.jpg"));
    }

    #[test]
    fn default_values() {
        let cli = Cli::parse_from(["vogue-ai", "me.jpg"]);
        assert!(cli.output_dir.is_none());
        assert!(cli.model.is_none());
        assert!(cli.aspect_ratio.is_none());
        assert!(cli.prompt_file.is_none());
        assert!(!cli.side_by_side);
        assert!(!cli.data_uri);
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn all_options() {
        let cli = Cli::parse_from([
            "vogue-ai",
            "-o",
            "out",
            "-m",
            "nano-banana-pro",
            "-a",
            "4:5",
            "-p",
            "prompt.txt",
            "--side-by-side",
            "--data-uri",
            "--config",
            "cfg.toml",
            "-v",
            "me.png",
        ]);
        assert_eq!(cli.image, PathBuf::from("me.png"));
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.model.as_deref(), Some("nano-banana-pro"));
        assert_eq!(cli.aspect_ratio.as_deref(), Some("4:5"));
        assert_eq!(cli.prompt_file, Some(PathBuf::from("prompt.txt")));
        assert!(cli.side_by_side);
        assert!(cli.data_uri);
        assert_eq!(cli.config, Some(PathBuf::from("cfg.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn data_uri_input() {
        let cli = Cli::parse_from(["vogue-ai", "data:image/png;base64,AQID"]);
        assert_eq!(cli.inline_image(), Some("data:image/png;base64,AQID"));
        let cli = Cli::parse_from(["vogue-ai", "me.png"]);
        assert_eq!(cli.inline_image(), None);
    }

    #[test]
    fn image_is_required() {
        assert!(Cli::try_parse_from(["vogue-ai"]).is_err());
    }
}
