//! JNI bridge to the activity's window
//!
//! Implements [`SystemWindow`] over `android.view.Window` and
//! `android.view.WindowInsetsController`. Every Java object touched here is a
//! local reference owned by the caller's frame; nothing outlives the callback.

use android_activity::AndroidApp;
use jni::objects::{JObject, JValue};
use jni::{JNIEnv, JavaVM};

use sample_platform::{
    InsetTypes, InsetsController, PlatformError, Result, SystemBarsBehavior, SystemWindow,
};

/// First API level with `WindowInsetsController` and `setDecorFitsSystemWindows`
pub const INSETS_CONTROLLER_MIN_SDK: i32 = 30;

const INSETS_TYPE_CLASS: &str = "android/view/WindowInsets$Type";

/// Run `f` with this thread attached to the VM and the activity object at hand
pub fn with_activity<F, R>(app: &AndroidApp, f: F) -> jni::errors::Result<R>
where
    F: for<'local> FnOnce(&mut JNIEnv<'local>, &JObject<'local>) -> jni::errors::Result<R>,
{
    // SAFETY: android-activity hands out the process VM and a global ref to
    // the activity that both stay valid for as long as `app` does.
    let vm = unsafe { JavaVM::from_raw(app.vm_as_ptr() as *mut jni::sys::JavaVM) }?;
    let mut env = vm.attach_current_thread()?;
    let activity = unsafe { JObject::from_raw(app.activity_as_ptr() as jni::sys::jobject) };
    f(&mut env, &activity)
}

/// Convert a JNI failure, clearing any pending Java exception so the VM stays usable
fn check<T>(env: &mut JNIEnv<'_>, result: jni::errors::Result<T>) -> Result<T> {
    result.map_err(|e| {
        if env.exception_check().unwrap_or(false) {
            let _ = env.exception_describe();
            let _ = env.exception_clear();
        }
        PlatformError::Jni(e.to_string())
    })
}

/// `Build.VERSION.SDK_INT`
pub fn sdk_int(env: &mut JNIEnv<'_>) -> Result<i32> {
    let value = env
        .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .and_then(|v| v.i());
    check(env, value)
}

/// The activity's window, borrowed for one callback
pub struct JniSystemWindow<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    activity: &'a JObject<'a>,
    sdk_int: Option<i32>,
}

impl<'a, 'local> JniSystemWindow<'a, 'local> {
    pub fn new(env: &'a mut JNIEnv<'local>, activity: &'a JObject<'a>) -> Self {
        Self {
            env,
            activity,
            sdk_int: None,
        }
    }

    fn require_insets_api(&mut self) -> Result<()> {
        let sdk = match self.sdk_int {
            Some(sdk) => sdk,
            None => {
                let sdk = sdk_int(self.env)?;
                self.sdk_int = Some(sdk);
                sdk
            }
        };
        if sdk < INSETS_CONTROLLER_MIN_SDK {
            return Err(PlatformError::InsetsUnavailable(format!(
                "API level {} < {}",
                sdk, INSETS_CONTROLLER_MIN_SDK
            )));
        }
        Ok(())
    }

    fn window(&mut self) -> Result<JObject<'local>> {
        let window = self
            .env
            .call_method(self.activity, "getWindow", "()Landroid/view/Window;", &[])
            .and_then(|v| v.l());
        let window = check(self.env, window)?;
        if window.is_null() {
            return Err(PlatformError::InsetsUnavailable(
                "activity has no window".to_string(),
            ));
        }
        Ok(window)
    }
}

impl SystemWindow for JniSystemWindow<'_, '_> {
    fn insets_controller(&mut self) -> Result<Option<Box<dyn InsetsController + '_>>> {
        self.require_insets_api()?;

        let window = self.window()?;
        let decor = self
            .env
            .call_method(&window, "getDecorView", "()Landroid/view/View;", &[])
            .and_then(|v| v.l());
        let decor = check(self.env, decor)?;
        if decor.is_null() {
            return Ok(None);
        }

        let controller = self
            .env
            .call_method(
                &decor,
                "getWindowInsetsController",
                "()Landroid/view/WindowInsetsController;",
                &[],
            )
            .and_then(|v| v.l());
        let controller = check(self.env, controller)?;
        if controller.is_null() {
            return Ok(None);
        }

        Ok(Some(Box::new(JniInsetsController {
            env: &mut *self.env,
            controller,
        })))
    }

    fn set_decor_fits_system_windows(&mut self, fits: bool) -> Result<()> {
        self.require_insets_api()?;

        let window = self.window()?;
        let result = self
            .env
            .call_method(
                &window,
                "setDecorFitsSystemWindows",
                "(Z)V",
                &[JValue::Bool(fits.into())],
            )
            .map(|_| ());
        check(self.env, result)
    }
}

/// A decor view's `WindowInsetsController`
pub struct JniInsetsController<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    controller: JObject<'local>,
}

impl JniInsetsController<'_, '_> {
    /// Resolve categories through `WindowInsets.Type` rather than trusting the bit layout
    fn platform_types(&mut self, types: InsetTypes) -> Result<i32> {
        let mut raw = 0;
        for category in types.iter() {
            let method = match category {
                InsetTypes::STATUS_BARS => "statusBars",
                InsetTypes::NAVIGATION_BARS => "navigationBars",
                other => {
                    raw |= other.bits();
                    continue;
                }
            };
            let value = self
                .env
                .call_static_method(INSETS_TYPE_CLASS, method, "()I", &[])
                .and_then(|v| v.i());
            raw |= check(self.env, value)?;
        }
        Ok(raw)
    }
}

impl InsetsController for JniInsetsController<'_, '_> {
    fn hide(&mut self, types: InsetTypes) -> Result<()> {
        let raw = self.platform_types(types)?;
        let result = self
            .env
            .call_method(&self.controller, "hide", "(I)V", &[JValue::Int(raw)])
            .map(|_| ());
        check(self.env, result)
    }

    fn set_system_bars_behavior(&mut self, behavior: SystemBarsBehavior) -> Result<()> {
        let result = self
            .env
            .call_method(
                &self.controller,
                "setSystemBarsBehavior",
                "(I)V",
                &[JValue::Int(behavior.raw())],
            )
            .map(|_| ());
        check(self.env, result)
    }
}
