//! # User-Agent Classification
//!
//! Coarse device/browser/OS buckets from the scanning browser's user
//! agent. Advisory only: the result feeds the guardian dashboard and is
//! never authoritative, so anything unrecognized falls through to the
//! unknown buckets instead of failing.

use wardlink_core::{Browser, DeviceInfo, DeviceKind, Os};

/// Classify a user-agent string. Never fails.
pub fn classify_user_agent(user_agent: &str) -> DeviceInfo {
    let ua = user_agent.to_ascii_lowercase();
    if ua.trim().is_empty() {
        return DeviceInfo::unknown();
    }

    let os = if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
        Os::Ios
    } else if ua.contains("android") {
        Os::Android
    } else if ua.contains("windows") {
        Os::Windows
    } else if ua.contains("mac os") || ua.contains("macintosh") {
        Os::MacOs
    } else if ua.contains("linux") {
        Os::Linux
    } else {
        Os::Other
    };

    // Order matters: Edge and Chrome both advertise "chrome", and almost
    // everything advertises "safari".
    let browser = if ua.contains("edg/") || ua.contains("edge") {
        Browser::Edge
    } else if ua.contains("chrome") || ua.contains("crios") {
        Browser::Chrome
    } else if ua.contains("firefox") || ua.contains("fxios") {
        Browser::Firefox
    } else if ua.contains("safari") {
        Browser::Safari
    } else {
        Browser::Other
    };

    let device = match os {
        Os::Ios => {
            if ua.contains("ipad") {
                DeviceKind::Tablet
            } else {
                DeviceKind::Mobile
            }
        }
        // Android tablets drop the "mobile" hint.
        Os::Android => {
            if ua.contains("mobile") {
                DeviceKind::Mobile
            } else {
                DeviceKind::Tablet
            }
        }
        Os::Windows | Os::MacOs | Os::Linux => DeviceKind::Desktop,
        Os::Other => {
            if ua.contains("mobile") {
                DeviceKind::Mobile
            } else {
                DeviceKind::Unknown
            }
        }
    };

    DeviceInfo {
        device,
        browser,
        os,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
    const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 13; SM-X710) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const WINDOWS_EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
    const MAC_FIREFOX: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0";

    #[test]
    fn iphone_is_mobile_safari_ios() {
        let info = classify_user_agent(IPHONE_SAFARI);
        assert_eq!(info.device, DeviceKind::Mobile);
        assert_eq!(info.browser, Browser::Safari);
        assert_eq!(info.os, Os::Ios);
    }

    #[test]
    fn android_phone_is_mobile_chrome() {
        let info = classify_user_agent(ANDROID_CHROME);
        assert_eq!(info.device, DeviceKind::Mobile);
        assert_eq!(info.browser, Browser::Chrome);
        assert_eq!(info.os, Os::Android);
    }

    #[test]
    fn android_without_mobile_hint_is_tablet() {
        let info = classify_user_agent(ANDROID_TABLET);
        assert_eq!(info.device, DeviceKind::Tablet);
    }

    #[test]
    fn edge_wins_over_chrome_token() {
        let info = classify_user_agent(WINDOWS_EDGE);
        assert_eq!(info.browser, Browser::Edge);
        assert_eq!(info.device, DeviceKind::Desktop);
        assert_eq!(info.os, Os::Windows);
    }

    #[test]
    fn firefox_on_mac() {
        let info = classify_user_agent(MAC_FIREFOX);
        assert_eq!(info.browser, Browser::Firefox);
        assert_eq!(info.os, Os::MacOs);
        assert_eq!(info.device, DeviceKind::Desktop);
    }

    #[test]
    fn garbage_and_empty_never_fail() {
        assert_eq!(classify_user_agent(""), DeviceInfo::unknown());
        assert_eq!(classify_user_agent("   "), DeviceInfo::unknown());
        let info = classify_user_agent("curl/8.4.0");
        assert_eq!(info.device, DeviceKind::Unknown);
        assert_eq!(info.browser, Browser::Other);
        assert_eq!(info.os, Os::Other);
    }
}
