//! access(2)-based checks for Unix

use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

pub fn can_read(path: &Path) -> bool {
    access(path, libc::R_OK)
}

pub fn can_write(path: &Path) -> bool {
    access(path, libc::W_OK)
}

/// Directory search permission is what lets us open entries below it
pub fn can_enter(path: &Path) -> bool {
    access(path, libc::R_OK | libc::X_OK)
}

fn access(path: &Path, mode: libc::c_int) -> bool {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
}
