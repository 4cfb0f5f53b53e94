//! Startup banner.

use std::path::Path;

use crate::consts::{AUTHOR, HOMEPAGE, REPO};

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub server: &'a str,
    pub endpoint: &'a str,
    pub config: &'a Path,
}

/// Render the startup banner with session info.
pub fn banner_text(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║            E V A L P A D              ║
   ║   type an expression, get an answer   ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   server    {}
   endpoint  {}
   config    {}

   /help for commands, Ctrl+D to exit
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.server,
        info.endpoint,
        info.config.display(),
    )
}

/// Print the startup banner.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner_text(info));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn info() -> (String, String, PathBuf) {
        (
            "http://localhost:8000".to_string(),
            "http://localhost:8000/api/expr".to_string(),
            PathBuf::from("/tmp/evalpad.db"),
        )
    }

    #[test]
    fn banner_lists_session_details() {
        let (server, endpoint, config) = info();
        let text = banner_text(&BannerInfo {
            server: &server,
            endpoint: &endpoint,
            config: &config,
        });
        assert!(text.contains("E V A L P A D"));
        assert!(text.contains("http://localhost:8000/api/expr"));
        assert!(text.contains("/tmp/evalpad.db"));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn print_banner_does_not_panic() {
        let (server, endpoint, config) = info();
        print_banner(&BannerInfo {
            server: &server,
            endpoint: &endpoint,
            config: &config,
        });
    }
}
