use crate::storage::PreferenceStore;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::cell::RefCell;
use std::rc::Rc;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

pub const THEME_KEY: &str = "theme";

/// Light/dark mode. Persisted form is exactly `"light"` or `"dark"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ThemeState {
    #[default]
    Light,
    Dark,
}

impl ThemeState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }
}

/// OS-level color scheme preference. `None` means the signal is unavailable.
pub trait ColorSchemeSignal {
    fn prefers_dark(&self) -> Option<bool>;
}

/// The presentation root that carries the active theme marker.
pub trait ThemeTarget {
    fn apply(&mut self, theme: ThemeState);
}

/// Persisted choice, then OS preference, then `Light`. Never fails.
pub fn resolve_initial(store: &dyn PreferenceStore, signal: &dyn ColorSchemeSignal) -> ThemeState {
    let persisted = match store.get(THEME_KEY) {
        Ok(value) => value.and_then(|v| v.parse::<ThemeState>().ok()),
        Err(e) => {
            log::warn!("Could not read persisted theme: {}", e);
            None
        }
    };

    persisted
        .or_else(|| signal.prefers_dark().map(ThemeState::from_prefers_dark))
        .unwrap_or_default()
}

pub type SharedThemeStore = Rc<RefCell<ThemeStore>>;

pub struct ThemeStore {
    current: ThemeState,
    storage: Box<dyn PreferenceStore>,
    target: Box<dyn ThemeTarget>,
}

impl ThemeStore {
    /// Resolves the initial theme and applies it to `target`. The resolved
    /// value is not written back; only explicit choices are persisted.
    pub fn new(
        storage: Box<dyn PreferenceStore>,
        signal: &dyn ColorSchemeSignal,
        mut target: Box<dyn ThemeTarget>,
    ) -> Self {
        let current = resolve_initial(storage.as_ref(), signal);
        target.apply(current);
        Self {
            current,
            storage,
            target,
        }
    }

    pub fn shared(self) -> SharedThemeStore {
        Rc::new(RefCell::new(self))
    }

    pub fn current(&self) -> ThemeState {
        self.current
    }

    pub fn set(&mut self, value: ThemeState) {
        self.current = value;
        self.target.apply(value);
        if let Err(e) = self.storage.set(THEME_KEY, value.as_ref()) {
            log::warn!("Could not persist theme '{}': {}", value, e);
        }
    }

    pub fn toggle(&mut self) -> ThemeState {
        self.set(self.current.toggled());
        self.current
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};
    use proptest::prelude::*;

    struct Signal(Option<bool>);

    impl ColorSchemeSignal for Signal {
        fn prefers_dark(&self) -> Option<bool> {
            self.0
        }
    }

    /// Records the marker set on the root after every apply.
    #[derive(Clone, Default)]
    struct Root(Rc<RefCell<Vec<ThemeState>>>);

    impl ThemeTarget for Root {
        fn apply(&mut self, theme: ThemeState) {
            self.0.borrow_mut().push(theme);
        }
    }

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::DataDirNotFound)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::DataDirNotFound)
        }
    }

    /// Shares entries with the test so writes stay observable after the
    /// store has been boxed.
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl PreferenceStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().set(key, value)
        }
    }

    fn signal_strategy() -> impl Strategy<Value = Option<bool>> {
        prop_oneof![Just(None), Just(Some(true)), Just(Some(false))]
    }

    #[test]
    fn test_theme_parsing_is_strict() {
        assert_eq!("light".parse::<ThemeState>().unwrap(), ThemeState::Light);
        assert_eq!("dark".parse::<ThemeState>().unwrap(), ThemeState::Dark);
        assert!("Dark".parse::<ThemeState>().is_err());
        assert!("".parse::<ThemeState>().is_err());
        assert_eq!(ThemeState::Dark.to_string(), "dark");
    }

    #[test]
    fn test_resolution_order() {
        let dark = MemoryStore::with_entry(THEME_KEY, "dark");
        assert_eq!(resolve_initial(&dark, &Signal(Some(false))), ThemeState::Dark);

        let empty = MemoryStore::new();
        assert_eq!(resolve_initial(&empty, &Signal(Some(true))), ThemeState::Dark);
        assert_eq!(resolve_initial(&empty, &Signal(Some(false))), ThemeState::Light);
        assert_eq!(resolve_initial(&empty, &Signal(None)), ThemeState::Light);
    }

    #[test]
    fn test_storage_failure_falls_through() {
        assert_eq!(resolve_initial(&BrokenStore, &Signal(Some(true))), ThemeState::Dark);
        assert_eq!(resolve_initial(&BrokenStore, &Signal(None)), ThemeState::Light);
    }

    #[test]
    fn test_new_applies_resolved_theme_without_persisting() {
        let root = Root::default();
        let storage = SharedStore::default();
        let store = ThemeStore::new(
            Box::new(storage.clone()),
            &Signal(Some(true)),
            Box::new(root.clone()),
        );

        assert_eq!(store.current(), ThemeState::Dark);
        assert_eq!(*root.0.borrow(), vec![ThemeState::Dark]);
        assert_eq!(storage.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_writes_through() {
        let root = Root::default();
        let storage = SharedStore::default();
        let mut store =
            ThemeStore::new(Box::new(storage.clone()), &Signal(None), Box::new(root.clone()));

        store.set(ThemeState::Dark);
        assert_eq!(store.current(), ThemeState::Dark);
        assert_eq!(root.0.borrow().last(), Some(&ThemeState::Dark));
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        // same value twice leaves the same marker
        store.set(ThemeState::Dark);
        assert_eq!(root.0.borrow().last(), Some(&ThemeState::Dark));
    }

    #[test]
    fn test_persistence_failure_is_swallowed() {
        let root = Root::default();
        let mut store = ThemeStore::new(Box::new(BrokenStore), &Signal(None), Box::new(root.clone()));

        assert_eq!(store.toggle(), ThemeState::Dark);
        assert_eq!(store.current(), ThemeState::Dark);
        assert_eq!(root.0.borrow().last(), Some(&ThemeState::Dark));
    }

    proptest! {
        #[test]
        fn prop_toggle_is_involution(dark in any::<bool>()) {
            let x = ThemeState::from_prefers_dark(dark);
            prop_assert_eq!(x.toggled().toggled(), x);

            let mut store = ThemeStore::new(
                Box::new(MemoryStore::new()),
                &Signal(Some(dark)),
                Box::new(Root::default()),
            );
            store.toggle();
            store.toggle();
            prop_assert_eq!(store.current(), x);
        }

        #[test]
        fn prop_persisted_choice_wins(dark in any::<bool>(), os in signal_strategy()) {
            let value = ThemeState::from_prefers_dark(dark);
            let storage = SharedStore::default();
            let mut store = ThemeStore::new(
                Box::new(storage.clone()),
                &Signal(None),
                Box::new(Root::default()),
            );
            store.set(value);

            prop_assert_eq!(resolve_initial(&storage, &Signal(os)), value);
        }

        #[test]
        fn prop_invalid_values_fall_back(raw in "[A-Za-z]{0,8}", os in signal_strategy()) {
            prop_assume!(raw != "light" && raw != "dark");
            let storage = MemoryStore::with_entry(THEME_KEY, &raw);
            let expected = os.map(ThemeState::from_prefers_dark).unwrap_or(ThemeState::Light);
            prop_assert_eq!(resolve_initial(&storage, &Signal(os)), expected);
        }
    }
}
