//! Platform and deployment-target resolution for the catalog compiler.
//!
//! Both lookups are total: each walks a fixed fallback chain (explicit value,
//! build environment, host detection or a static table) and always ends with
//! an answer. The environment is read through a lookup function so the chains
//! can be tested without touching the process environment.

use std::env;
use std::fmt;

/// Exact platform name exported by the build system (`iphonesimulator`).
pub const ENV_PLATFORM_NAME: &str = "PLATFORM_NAME";
/// SDK name exported by the build system (`iphonesimulator17.0`).
pub const ENV_SDK_NAME: &str = "SDK_NAME";
/// Set inside a running simulator.
pub const ENV_SIMULATOR_DEVICE: &str = "SIMULATOR_DEVICE_NAME";

pub const FALLBACK_PLATFORM: &str = "macosx";
pub const FALLBACK_DEPLOYMENT_TARGET: &str = "12.0";

/// Known platform with its deployment-target variable and default.
struct PlatformSpec {
    name: &'static str,
    deployment_env: &'static str,
    default_version: &'static str,
}

// SDK names are matched by the first entry they contain.
const PLATFORM_SPECS: &[PlatformSpec] = &[
    PlatformSpec {
        name: "iphonesimulator",
        deployment_env: "IPHONEOS_DEPLOYMENT_TARGET",
        default_version: "15.0",
    },
    PlatformSpec {
        name: "iphoneos",
        deployment_env: "IPHONEOS_DEPLOYMENT_TARGET",
        default_version: "15.0",
    },
    PlatformSpec {
        name: "appletvsimulator",
        deployment_env: "TVOS_DEPLOYMENT_TARGET",
        default_version: "15.0",
    },
    PlatformSpec {
        name: "appletvos",
        deployment_env: "TVOS_DEPLOYMENT_TARGET",
        default_version: "15.0",
    },
    PlatformSpec {
        name: "watchsimulator",
        deployment_env: "WATCHOS_DEPLOYMENT_TARGET",
        default_version: "8.0",
    },
    PlatformSpec {
        name: "watchos",
        deployment_env: "WATCHOS_DEPLOYMENT_TARGET",
        default_version: "8.0",
    },
    PlatformSpec {
        name: "xrsimulator",
        deployment_env: "XROS_DEPLOYMENT_TARGET",
        default_version: "1.0",
    },
    PlatformSpec {
        name: "xros",
        deployment_env: "XROS_DEPLOYMENT_TARGET",
        default_version: "1.0",
    },
    PlatformSpec {
        name: "macosx",
        deployment_env: "MACOSX_DEPLOYMENT_TARGET",
        default_version: "12.0",
    },
];

fn spec_for(platform: &str) -> Option<&'static PlatformSpec> {
    PLATFORM_SPECS.iter().find(|spec| spec.name == platform)
}

/// Platform parameters handed to the catalog compiler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformTarget {
    pub platform: String,
    pub deployment_target: String,
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.platform, self.deployment_target)
    }
}

pub struct PlatformResolver<F> {
    lookup: F,
}

impl PlatformResolver<fn(&str) -> Option<String>> {
    /// Resolver backed by the process environment.
    pub fn from_env() -> Self {
        Self {
            lookup: process_env,
        }
    }
}

impl<F> PlatformResolver<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn with_lookup(lookup: F) -> Self {
        Self { lookup }
    }

    fn var(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    /// Explicit override, then `PLATFORM_NAME`, then `SDK_NAME` matched
    /// against the known platforms, then the host.
    pub fn resolve_platform(&self, explicit: Option<&str>) -> String {
        if let Some(platform) = explicit.filter(|value| !value.trim().is_empty()) {
            return platform.to_string();
        }
        if let Some(platform) = self.var(ENV_PLATFORM_NAME) {
            return platform;
        }
        if let Some(sdk) = self.var(ENV_SDK_NAME) {
            let sdk = sdk.to_ascii_lowercase();
            if let Some(spec) = PLATFORM_SPECS.iter().find(|spec| sdk.contains(spec.name)) {
                return spec.name.to_string();
            }
        }
        self.host_platform()
    }

    /// Explicit override, then the platform's deployment variable, then the
    /// built-in default for the platform.
    pub fn resolve_deployment_target(&self, platform: &str, explicit: Option<&str>) -> String {
        if let Some(version) = explicit.filter(|value| !value.trim().is_empty()) {
            return version.to_string();
        }
        let Some(spec) = spec_for(platform) else {
            return FALLBACK_DEPLOYMENT_TARGET.to_string();
        };
        self.var(spec.deployment_env)
            .unwrap_or_else(|| spec.default_version.to_string())
    }

    pub fn resolve(
        &self,
        platform_override: Option<&str>,
        deployment_override: Option<&str>,
    ) -> PlatformTarget {
        let platform = self.resolve_platform(platform_override);
        let deployment_target = self.resolve_deployment_target(&platform, deployment_override);
        PlatformTarget {
            platform,
            deployment_target,
        }
    }

    fn host_platform(&self) -> String {
        let simulator = self.var(ENV_SIMULATOR_DEVICE).is_some();
        host_platform_name(env::consts::OS, simulator).to_string()
    }
}

/// Map a host OS name to a platform, picking the simulator flavour when
/// running inside one. Hosts that are not Apple platforms fall back to macOS.
pub fn host_platform_name(os: &str, simulator: bool) -> &'static str {
    match (os, simulator) {
        ("ios", false) => "iphoneos",
        ("ios", true) => "iphonesimulator",
        ("tvos", false) => "appletvos",
        ("tvos", true) => "appletvsimulator",
        ("watchos", false) => "watchos",
        ("watchos", true) => "watchsimulator",
        ("visionos", false) => "xros",
        ("visionos", true) => "xrsimulator",
        _ => FALLBACK_PLATFORM,
    }
}

fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    // Owns its variables, so callers may pass a temporary slice.
    fn resolver(
        vars: &[(&str, &str)],
    ) -> PlatformResolver<impl Fn(&str) -> Option<String> + use<>> {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PlatformResolver::with_lookup(move |name: &str| vars.get(name).cloned())
    }

    #[test]
    fn explicit_platform_wins() {
        let resolver = resolver(&[(ENV_PLATFORM_NAME, "iphoneos")]);
        assert_eq!(resolver.resolve_platform(Some("watchos")), "watchos");
    }

    #[test]
    fn platform_name_beats_sdk_name() {
        let resolver = resolver(&[
            (ENV_PLATFORM_NAME, "appletvos"),
            (ENV_SDK_NAME, "iphonesimulator17.0"),
        ]);
        assert_eq!(resolver.resolve_platform(None), "appletvos");
    }

    #[test]
    fn sdk_name_is_substring_matched() {
        for (sdk, expected) in [
            ("iphonesimulator17.2", "iphonesimulator"),
            ("iphoneos17.2", "iphoneos"),
            ("MacOSX14.0", "macosx"),
            ("watchsimulator10.0", "watchsimulator"),
        ] {
            let sdk_resolver = resolver(&[(ENV_SDK_NAME, sdk)]);
            assert_eq!(sdk_resolver.resolve_platform(None), expected, "{sdk}");
        }
    }

    #[test]
    fn unknown_sdk_and_empty_values_fall_through_to_host() {
        let resolver = resolver(&[(ENV_PLATFORM_NAME, " "), (ENV_SDK_NAME, "driverkit23.0")]);
        assert_eq!(
            resolver.resolve_platform(None),
            host_platform_name(env::consts::OS, false)
        );
    }

    #[test]
    fn host_detection_distinguishes_simulators() {
        assert_eq!(host_platform_name("ios", false), "iphoneos");
        assert_eq!(host_platform_name("ios", true), "iphonesimulator");
        assert_eq!(host_platform_name("macos", false), "macosx");
        assert_eq!(host_platform_name("linux", true), "macosx");
    }

    #[test]
    fn deployment_target_chain() {
        let resolver = resolver(&[("IPHONEOS_DEPLOYMENT_TARGET", "16.4")]);
        assert_eq!(resolver.resolve_deployment_target("iphoneos", Some("17.0")), "17.0");
        assert_eq!(resolver.resolve_deployment_target("iphonesimulator", None), "16.4");
        assert_eq!(resolver.resolve_deployment_target("macosx", None), "12.0");
        assert_eq!(resolver.resolve_deployment_target("watchos", None), "8.0");
        assert_eq!(resolver.resolve_deployment_target("xros", None), "1.0");
        assert_eq!(resolver.resolve_deployment_target("driverkit", None), "12.0");
    }

    #[test]
    fn resolve_combines_both_chains() {
        let resolver = resolver(&[
            (ENV_SDK_NAME, "appletvsimulator17.0"),
            ("TVOS_DEPLOYMENT_TARGET", "16.0"),
        ]);
        assert_eq!(
            resolver.resolve(None, None),
            PlatformTarget {
                platform: "appletvsimulator".into(),
                deployment_target: "16.0".into(),
            }
        );
    }
}
