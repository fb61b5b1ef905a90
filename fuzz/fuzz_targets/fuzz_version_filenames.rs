#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz product-id and date extraction from file names.
///
/// Each line of input is treated as one storage key.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let modified = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH;
        let files: Vec<_> = s
            .lines()
            .map(|key| lqs_tools::FileDescriptor::from_key(key, 0, modified))
            .collect();
        let index = lqs_tools::group_versions(&files);
        assert_eq!(index.file_count(), files.len());
        assert_eq!(lqs_tools::resolve_latest(&files).len(), index.product_count());
    }
});
