//! AndroidManifest.xml generation
//!
//! Registers the platform `NativeActivity` and advertises the native library
//! through the `android.app.lib_name` meta-data, which is how the platform
//! learns which shared object to load and call into.

use sample_platform::{ShimConfig, LIB_NAME_META_DATA};
use thiserror::Error;

/// Activity class provided by the platform
pub const NATIVE_ACTIVITY_CLASS: &str = "android.app.NativeActivity";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("invalid package name '{0}': expected dotted identifiers like com.example.app")]
    InvalidPackage(String),

    #[error(transparent)]
    Platform(#[from] sample_platform::PlatformError),
}

fn is_valid_package(package: &str) -> bool {
    let segments: Vec<&str> = package.split('.').collect();
    segments.len() >= 2
        && segments.iter().all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the manifest for `config`
pub fn render_manifest(config: &ShimConfig) -> Result<String, ManifestError> {
    let android = &config.android;
    if !is_valid_package(&android.package) {
        return Err(ManifestError::InvalidPackage(android.package.clone()));
    }
    let library = config.library_name()?;
    let (meta_key, meta_value) = library.manifest_meta_data();

    Ok(format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    package="{package}">

    <uses-sdk
        android:minSdkVersion="{min_sdk}"
        android:targetSdkVersion="{target_sdk}" />

    <application
        android:label="{label}"
        android:hasCode="false"
        android:theme="@android:style/Theme.DeviceDefault.NoActionBar.Fullscreen">

        <activity
            android:name="{activity}"
            android:configChanges="orientation|screenSize|keyboardHidden"
            android:launchMode="singleTask"
            android:exported="true">

            <meta-data
                android:name="{meta_key}"
                android:value="{meta_value}" />

            <intent-filter>
                <action android:name="android.intent.action.MAIN" />
                <category android:name="android.intent.category.LAUNCHER" />
            </intent-filter>
        </activity>
    </application>
</manifest>
"#,
        package = android.package,
        min_sdk = android.min_sdk,
        target_sdk = android.target_sdk,
        label = escape_attr(&android.label),
        activity = NATIVE_ACTIVITY_CLASS,
        meta_key = meta_key,
        meta_value = escape_attr(meta_value),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_native_activity_with_lib_name() {
        let xml = render_manifest(&ShimConfig::default()).unwrap();

        assert!(xml.contains(r#"android:name="android.app.NativeActivity""#));
        assert!(xml.contains(&format!(r#"android:name="{}""#, LIB_NAME_META_DATA)));
        assert!(xml.contains(r#"android:value="MultiPlatformSample""#));
        assert!(xml.contains(r#"android:hasCode="false""#));
        assert!(xml.contains(r#"android:minSdkVersion="24""#));
    }

    #[test]
    fn activity_attributes_match_cargo_apk_metadata() {
        let xml = render_manifest(&ShimConfig::default()).unwrap();
        let metadata = include_str!("../../../mobile/multiplatform_sample/Cargo.toml");

        assert!(metadata.contains(r#"launch_mode = "singleTask""#));
        assert!(xml.contains(r#"android:launchMode="singleTask""#));
        assert!(metadata.contains(r#"config_changes = "orientation|screenSize|keyboardHidden""#));
        assert!(xml.contains(r#"android:configChanges="orientation|screenSize|keyboardHidden""#));
        assert!(metadata.contains("Theme.DeviceDefault.NoActionBar.Fullscreen"));
        assert!(xml.contains("Theme.DeviceDefault.NoActionBar.Fullscreen"));
    }

    #[test]
    fn escapes_label() {
        let mut config = ShimConfig::default();
        config.android.label = "Tom & \"Jerry\"".to_string();
        let xml = render_manifest(&config).unwrap();
        assert!(xml.contains(r#"android:label="Tom &amp; &quot;Jerry&quot;""#));
    }

    #[test]
    fn rejects_bad_package_names() {
        for package in ["sample", "com..example", "com.1example", "com.exa-mple"] {
            let mut config = ShimConfig::default();
            config.android.package = package.to_string();
            assert!(matches!(
                render_manifest(&config),
                Err(ManifestError::InvalidPackage(_))
            ));
        }
    }
}
