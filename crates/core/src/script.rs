// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launcher script generation.
//!
//! Produces the source of the small standalone program the packaging tool
//! turns into a desktop launcher. Three variants exist, chosen in this order:
//!
//! 1. **Splash**: splash enabled and the splash page exists. A borderless
//!    500×300 window shows the bundled page centered on the primary screen,
//!    then gives way to the target (embedded window or system browser).
//! 2. **Embedded browser**: a 1024×720 embedded window titled after the app.
//! 3. **System browser**: opens the URL in the default browser and exits.
//!
//! Generation has no side effects; the caller persists the text.

use crate::template::{escape_py_str, interpolate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Width and height of the splash window
pub const SPLASH_SIZE: (u32, u32) = (500, 300);
/// Width and height of the embedded browser window
pub const BROWSER_SIZE: (u32, u32) = (1024, 720);
/// Seconds the splash stays up when the page never asks to continue
pub const SPLASH_HOLD_SECS: u32 = 3;

/// Which launcher program gets generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LauncherVariant {
    Splash,
    EmbeddedBrowser,
    SystemBrowser,
}

crate::simple_display! {
    LauncherVariant {
        Splash => "splash",
        EmbeddedBrowser => "embedded browser",
        SystemBrowser => "system browser",
    }
}

/// Inputs for one launcher.
#[derive(Debug, Clone, Copy)]
pub struct LauncherSpec<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub company: &'a str,
    /// Window icon path with forward slashes, empty when unset
    pub window_icon: &'a str,
    pub use_embedded_browser: bool,
    pub use_splash: bool,
    pub splash_html: Option<&'a Path>,
}

/// Generated launcher source and the variant it implements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherScript {
    pub variant: LauncherVariant,
    pub text: String,
}

impl LauncherScript {
    /// Directory the packaging tool must bundle for the splash page.
    ///
    /// `None` unless the splash variant was generated. A bare file name
    /// bundles the current directory.
    pub fn splash_dir(&self, params: &LauncherSpec<'_>) -> Option<PathBuf> {
        if self.variant != LauncherVariant::Splash {
            return None;
        }
        params.splash_html.map(|html| match html.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        })
    }
}

/// Pick the variant for `params`. Checks the splash file exists right now.
pub fn select_variant(params: &LauncherSpec<'_>) -> LauncherVariant {
    let splash_ready = params.use_splash
        && params.splash_html.is_some_and(|p| !p.as_os_str().is_empty() && p.is_file());
    if splash_ready {
        LauncherVariant::Splash
    } else if params.use_embedded_browser {
        LauncherVariant::EmbeddedBrowser
    } else {
        LauncherVariant::SystemBrowser
    }
}

pub fn render_launcher(params: &LauncherSpec<'_>) -> LauncherScript {
    let variant = select_variant(params);

    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert("url", escape_py_str(params.url));
    vars.insert("title", escape_py_str(params.title));
    vars.insert("browser_width", BROWSER_SIZE.0.to_string());
    vars.insert("browser_height", BROWSER_SIZE.1.to_string());
    vars.insert("app_id_block", app_id_block(params));

    let template = match variant {
        LauncherVariant::Splash => {
            let splash_file = params
                .splash_html
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            vars.insert("splash_file", escape_py_str(&splash_file));
            vars.insert("splash_width", SPLASH_SIZE.0.to_string());
            vars.insert("splash_height", SPLASH_SIZE.1.to_string());
            vars.insert("splash_hold", SPLASH_HOLD_SECS.to_string());
            vars.insert("embedded", py_bool(params.use_embedded_browser).to_string());
            vars.insert(
                "browser_import",
                if params.use_embedded_browser { "" } else { "import webbrowser\n" }.to_string(),
            );
            SPLASH_TEMPLATE
        }
        LauncherVariant::EmbeddedBrowser => EMBEDDED_TEMPLATE,
        LauncherVariant::SystemBrowser => SYSTEM_BROWSER_TEMPLATE,
    };

    LauncherScript { variant, text: interpolate(template, &vars) }
}

/// Best-effort AppUserModelID setup, emitted only when a window icon is set.
///
/// Windows groups taskbar icons by this ID; without it the embedded window
/// shows the interpreter's icon.
fn app_id_block(params: &LauncherSpec<'_>) -> String {
    if params.window_icon.is_empty()
        || matches!(select_variant(params), LauncherVariant::SystemBrowser)
    {
        return String::new();
    }
    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert("app_id", escape_py_str(&app_user_model_id(params.company, params.title)));
    interpolate(APP_ID_TEMPLATE, &vars)
}

/// `Company.Title` with anything outside `[A-Za-z0-9.]` replaced by `_`.
fn app_user_model_id(company: &str, title: &str) -> String {
    let company = company.trim();
    let raw = if company.is_empty() {
        format!("webexe.{}", title.trim())
    } else {
        format!("{company}.{}", title.trim())
    };
    raw.chars().map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' }).collect()
}

fn py_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

const APP_ID_TEMPLATE: &str = r#"
if sys.platform == "win32":
    import ctypes
    try:
        ctypes.windll.shell32.SetCurrentProcessExplicitAppUserModelID("${app_id}")
    except AttributeError:
        pass
"#;

const SYSTEM_BROWSER_TEMPLATE: &str = r#"import sys
import webbrowser

if __name__ == "__main__":
    webbrowser.open("${url}")
    sys.exit()
"#;

const EMBEDDED_TEMPLATE: &str = r#"import sys
import webview
${app_id_block}
if __name__ == "__main__":
    webview.create_window("${title}", "${url}", width=${browser_width}, height=${browser_height})
    webview.start()
"#;

const SPLASH_TEMPLATE: &str = r#"import os
import sys
import threading
import webview
${browser_import}${app_id_block}
TARGET_URL = "${url}"
TARGET_TITLE = "${title}"
USE_EMBEDDED_BROWSER = ${embedded}
SPLASH_FILE = "${splash_file}"
SPLASH_WIDTH = ${splash_width}
SPLASH_HEIGHT = ${splash_height}

splash_window = None
launched = threading.Event()


def bundle_root():
    return getattr(sys, "_MEIPASS", os.path.dirname(os.path.abspath(__file__)))


class Api:
    def launch(self):
        global splash_window
        if launched.is_set():
            return
        launched.set()
        if splash_window is not None:
            splash_window.destroy()
            splash_window = None
        if USE_EMBEDDED_BROWSER:
            webview.create_window(TARGET_TITLE, TARGET_URL, width=${browser_width}, height=${browser_height})
        else:
            webbrowser.open(TARGET_URL)
            os._exit(0)


api = Api()


def on_splash_loaded():
    if webview.screens:
        screen = webview.screens[0]
        splash_window.move((screen.width - SPLASH_WIDTH) // 2, (screen.height - SPLASH_HEIGHT) // 2)
    splash_window.show()
    threading.Timer(${splash_hold}, api.launch).start()


if __name__ == "__main__":
    splash_path = os.path.join(bundle_root(), SPLASH_FILE)
    splash_window = webview.create_window(
        "Loading...",
        "file://" + splash_path,
        width=SPLASH_WIDTH,
        height=SPLASH_HEIGHT,
        frameless=True,
        resizable=False,
        easy_drag=True,
        js_api=api,
        hidden=True,
    )
    splash_window.events.loaded += on_splash_loaded
    webview.start()
"#;

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
