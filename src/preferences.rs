//! Client preferences

use crate::storage::{KeyValueStorage, StorageError};

/// Storage key for the promotional banner dismissal flag.
pub const BANNER_DISMISSED_KEY: &str = "ihram.banner-dismissed";

/// Whether the promotional banner has been dismissed.
///
/// Anything other than a stored `true` (missing, unreadable, garbage) means the
/// banner is shown.
pub fn banner_dismissed<S: KeyValueStorage>(storage: &S) -> bool {
    storage
        .read(BANNER_DISMISSED_KEY)
        .ok()
        .flatten()
        .and_then(|raw| serde_json::from_str::<bool>(&raw).ok())
        .unwrap_or(false)
}

/// Remember that the promotional banner was dismissed.
///
/// # Errors
///
/// Returns a [`StorageError`] if the flag cannot be written.
pub fn dismiss_banner<S: KeyValueStorage>(storage: &mut S) -> Result<(), StorageError> {
    storage.write(BANNER_DISMISSED_KEY, "true")
}

/// Show the promotional banner again.
///
/// # Errors
///
/// Returns a [`StorageError`] if the flag cannot be removed.
pub fn reset_banner<S: KeyValueStorage>(storage: &mut S) -> Result<(), StorageError> {
    storage.remove(BANNER_DISMISSED_KEY)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::MemoryStorage;

    use super::*;

    #[test]
    fn banner_is_shown_by_default() {
        assert!(!banner_dismissed(&MemoryStorage::new()));
    }

    #[test]
    fn corrupt_flag_shows_the_banner() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.write(BANNER_DISMISSED_KEY, "yes please")?;

        assert!(!banner_dismissed(&storage));

        Ok(())
    }

    #[test]
    fn dismissal_is_remembered_until_reset() -> TestResult {
        let mut storage = MemoryStorage::new();

        dismiss_banner(&mut storage)?;
        assert!(banner_dismissed(&storage));

        reset_banner(&mut storage)?;
        assert!(!banner_dismissed(&storage));

        Ok(())
    }
}
