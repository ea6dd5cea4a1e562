use std::path::{Path, PathBuf};

/// Finds `bin` in the directories listed in `PATH`.
pub fn which(bin: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).find_map(|dir| executable_in(&dir, bin))
}

pub fn exists(bin: &str) -> bool {
    which(bin).is_some()
}

fn executable_in(dir: &Path, bin: &str) -> Option<PathBuf> {
    let candidate: PathBuf = dir.join(bin);
    if candidate.is_file() {
        return Some(candidate);
    }
    if cfg!(windows) {
        let exe: PathBuf = dir.join(format!("{bin}.exe"));
        if exe.is_file() {
            return Some(exe);
        }
    }
    None
}
