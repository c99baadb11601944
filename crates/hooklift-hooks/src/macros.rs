//! Convenience macros for hook development.

/// Emits the `create_hook` entry point a dynamically loaded hook library
/// must export.
///
/// # Example
/// ```rust,ignore
/// use hooklift_hooks::export_hook;
///
/// #[derive(Debug, Default)]
/// struct WidgetHook;
///
/// impl hooklift_hooks::LifecycleHook for WidgetHook {}
///
/// export_hook!(WidgetHook::default());
/// ```
#[macro_export]
macro_rules! export_hook {
    ($ctor:expr) => {
        /// Entry point resolved by the hook loader.
        #[unsafe(no_mangle)]
        pub extern "C" fn create_hook() -> *mut dyn $crate::traits::LifecycleHook {
            let hook: Box<dyn $crate::traits::LifecycleHook> = Box::new($ctor);
            Box::into_raw(hook)
        }
    };
}
