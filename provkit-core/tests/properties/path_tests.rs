//! Property tests for remote path manipulation

use proptest::prelude::*;
use provkit_core::host::PathStyle;

/// Strategy for path segments without separators or drive-like prefixes.
fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.-]{0,10}"
}

proptest! {
    /// Property: sftpify leaves POSIX paths unchanged
    #[test]
    fn sftpify_posix_is_identity(segs in proptest::collection::vec(segment(), 1..6)) {
        let path = format!("/{}", segs.join("/"));
        prop_assert_eq!(PathStyle::Posix.sftpify(&path), path.clone());
        prop_assert_eq!(PathStyle::Windows.sftpify(&path), path);
    }

    /// Property: sftpify is idempotent
    #[test]
    fn sftpify_is_idempotent(
        drive in "[A-Za-z]",
        segs in proptest::collection::vec(segment(), 1..6),
    ) {
        let path = format!("{drive}:\\{}", segs.join("\\"));
        let once = PathStyle::Windows.sftpify(&path);
        let twice = PathStyle::Windows.sftpify(&once);
        prop_assert_eq!(once, twice);
    }

    /// Property: splitdrive components concatenate back to the input
    #[test]
    fn splitdrive_concat_is_identity(
        drive in "[A-Za-z]",
        segs in proptest::collection::vec(segment(), 0..6),
    ) {
        for path in [
            format!("{drive}:\\{}", segs.join("\\")),
            format!("\\{}", segs.join("\\")),
            segs.join("\\"),
        ] {
            let (d, rest) = PathStyle::Windows.splitdrive(&path);
            prop_assert_eq!(format!("{d}{rest}"), path);
        }
    }

    /// Property: joining a segment then taking basename returns the segment
    #[test]
    fn join_basename_round_trip(
        head in proptest::collection::vec(segment(), 1..4),
        name in segment(),
    ) {
        let head = format!("/{}", head.join("/"));
        let joined = PathStyle::Posix.join(&head, &name);
        prop_assert_eq!(PathStyle::Posix.basename(&joined), name);
        prop_assert_eq!(PathStyle::Posix.dirname(&joined), head);
    }

    /// Property: normpath output never contains doubled separators
    #[test]
    fn normpath_has_no_doubled_separators(
        segs in proptest::collection::vec(segment(), 1..6),
        doubled in 0usize..3,
    ) {
        let sep = "/".repeat(doubled + 1);
        let path = format!("/{}", segs.join(&sep));
        let normalized = PathStyle::Posix.normpath(&path);
        prop_assert!(!normalized.contains("//"), "normalized: {normalized}");
    }

    /// Property: normpath is idempotent
    #[test]
    fn normpath_is_idempotent(segs in proptest::collection::vec(segment(), 1..6)) {
        let path = format!("/{}/./", segs.join("/"));
        let once = PathStyle::Posix.normpath(&path);
        let twice = PathStyle::Posix.normpath(&once);
        prop_assert_eq!(once, twice);
    }
}
