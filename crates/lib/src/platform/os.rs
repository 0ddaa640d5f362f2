use std::fmt;

/// Operating systems hostcheck knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
  OtherUnix,
}

impl Os {
  /// Detect the current operating system at runtime
  ///
  /// Returns `None` on targets that are neither Windows nor Unix
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ if cfg!(unix) => Some(Self::OtherUnix),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
      Self::OtherUnix => "unix",
    }
  }

  /// The command-syntax family this OS belongs to
  pub fn family(&self) -> Family {
    match self {
      Self::Windows => Family::Windows,
      Self::Linux | Self::MacOs | Self::OtherUnix => Family::Posix,
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// OS family, the axis along which the host checks differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
  Windows,
  Posix,
}

impl Family {
  /// The family of the running system. Anything that is not Windows is treated as POSIX.
  pub fn current() -> Self {
    if cfg!(windows) { Self::Windows } else { Self::Posix }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Windows => "windows",
      Self::Posix => "posix",
    }
  }
}

impl fmt::Display for Family {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
