//! `ccstatus version`

use crate::ui::Theme;

pub fn version_line() -> String {
    format!("ccstatus v{}", env!("CARGO_PKG_VERSION"))
}

/// `<os>/<arch>` of this build.
pub fn platform() -> String {
    format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH)
}

pub fn run() {
    let theme = Theme::default();
    println!();
    println!("  {}", theme.primary.apply_to(version_line()));
    println!("  {}", theme.dim.apply_to(platform()));
    println!();
}
