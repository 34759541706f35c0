//! Path manipulation for remote hosts.
//!
//! Remote paths are plain strings in the syntax of the remote OS family, so
//! the usual `std::path` types do not apply. [`PathStyle`] provides the small
//! set of operations the host layer needs (join, dirname, normpath,
//! splitdrive) for both POSIX and Windows style paths.

/// Path syntax family of a remote host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathStyle {
    /// `/`-separated paths without drive letters
    #[default]
    Posix,
    /// `\`-separated paths with optional `C:` style drive prefixes
    /// (forward slashes are accepted as separators too)
    Windows,
}

impl PathStyle {
    /// Returns the primary separator character for this style.
    pub const fn separator(self) -> char {
        match self {
            Self::Posix => '/',
            Self::Windows => '\\',
        }
    }

    fn is_separator(self, c: char) -> bool {
        match self {
            Self::Posix => c == '/',
            Self::Windows => c == '/' || c == '\\',
        }
    }

    /// Splits a path into `(drive, rest)`.
    ///
    /// Only Windows paths can carry a drive prefix (`C:`); for POSIX paths
    /// the drive component is always empty.
    pub fn splitdrive(self, path: &str) -> (&str, &str) {
        if self == Self::Windows {
            let bytes = path.as_bytes();
            if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
                return path.split_at(2);
            }
        }
        ("", path)
    }

    /// Joins two path segments with the style's separator.
    ///
    /// An absolute `tail` replaces `head`, matching the usual join semantics
    /// of OS path libraries.
    pub fn join(self, head: &str, tail: &str) -> String {
        if head.is_empty() || tail.chars().next().is_some_and(|c| self.is_separator(c)) {
            return tail.to_string();
        }
        let sep = self.separator();
        if head.chars().last().is_some_and(|c| self.is_separator(c)) {
            format!("{head}{tail}")
        } else {
            format!("{head}{sep}{tail}")
        }
    }

    /// Returns everything before the final separator, keeping the root.
    ///
    /// `dirname("/a/b")` is `/a`, `dirname("/a")` is `/`, `dirname("a")` is
    /// the empty string. The drive prefix, if any, stays attached.
    pub fn dirname(self, path: &str) -> String {
        let (drive, rest) = self.splitdrive(path);
        let cut = rest
            .char_indices()
            .rev()
            .find(|&(_, c)| self.is_separator(c))
            .map(|(i, _)| i);
        match cut {
            Some(0) => format!("{drive}{}", self.separator()),
            Some(i) => format!("{drive}{}", &rest[..i]),
            None => drive.to_string(),
        }
    }

    /// Returns the final path component.
    pub fn basename(self, path: &str) -> String {
        let (_, rest) = self.splitdrive(path);
        rest.rsplit(|c| self.is_separator(c))
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Normalizes a path: collapses repeated separators, resolves `.` and
    /// `..` components where possible, and drops any trailing separator.
    pub fn normpath(self, path: &str) -> String {
        let (drive, rest) = self.splitdrive(path);
        let rooted = rest.chars().next().is_some_and(|c| self.is_separator(c));
        let mut parts: Vec<&str> = Vec::new();
        for comp in rest.split(|c| self.is_separator(c)) {
            match comp {
                "" | "." => {}
                ".." => {
                    if let Some(last) = parts.last() {
                        if *last == ".." {
                            parts.push("..");
                        } else {
                            parts.pop();
                        }
                    } else if !rooted {
                        parts.push("..");
                    }
                }
                other => parts.push(other),
            }
        }
        let sep = self.separator().to_string();
        let joined = parts.join(&sep);
        let mut out = String::from(drive);
        if rooted {
            out.push_str(&sep);
        }
        out.push_str(&joined);
        if out.is_empty() { ".".to_string() } else { out }
    }

    /// Translates a host-OS absolute path for use with SFTP by stripping any
    /// drive prefix.
    ///
    /// SFTP treats every path as relative to its own root. This translation
    /// assumes the SFTP root coincides with the drive root; when that does
    /// not hold, file operations misbehave silently. Known limitation,
    /// inherited from the provisioning frontend this layer serves.
    pub fn sftpify(self, path: &str) -> String {
        self.splitdrive(path).1.to_string()
    }
}
