/// The file mode creation mask of the process.
///
/// Executable members are restored with the mode a freshly created executable would get, i.e.
/// `0o777` minus the masked bits, with the execute bits forced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Umask(u32);

impl Umask {
    /// Read the umask of the current process.
    ///
    /// There is no way to query the mask without setting it, so it's briefly set to `0` and then
    /// restored. Other threads creating files at the same moment would observe the zero mask.
    #[cfg(unix)]
    pub fn current() -> Self {
        use nix::sys::stat::{Mode, umask};

        let previous = umask(Mode::empty());
        umask(previous);
        Self(u32::from(previous.bits()))
    }

    /// Outside of Unix there are no mode bits to restore.
    #[cfg(not(unix))]
    pub fn current() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & 0o777)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The mode given to members that were executable in the archive.
    pub const fn executable_mode(self) -> u32 {
        (0o777 & !self.0) | 0o111
    }
}
