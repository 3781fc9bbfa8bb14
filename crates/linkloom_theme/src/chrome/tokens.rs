//! Admin chrome tokens
//!
//! One complete literal token set per mode. No references, no merging: a mode
//! change swaps the whole set.

use super::ChromeMode;
use indexmap::IndexMap;

/// Namespace of the admin chrome properties
pub const CHROME_PREFIX: &str = "--chrome-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrandTokens {
    pub primary: &'static str,
    pub primary_hover: &'static str,
    pub on_primary: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypographyTokens {
    pub font_family: &'static str,
    pub font_family_mono: &'static str,
    pub font_size_base: &'static str,
    pub font_size_small: &'static str,
    pub font_weight_medium: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundTokens {
    pub app: &'static str,
    pub sidebar: &'static str,
    pub topbar: &'static str,
    pub canvas: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextTokens {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub muted: &'static str,
    pub inverse: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BorderTokens {
    pub default: &'static str,
    pub subtle: &'static str,
    pub strong: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceTokens {
    pub card: &'static str,
    pub raised: &'static str,
    pub hover: &'static str,
    pub active: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowTokens {
    pub sm: &'static str,
    pub md: &'static str,
    pub lg: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccentTokens {
    pub default: &'static str,
    pub subtle: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub danger: &'static str,
}

/// Complete admin chrome token set for one mode
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminThemeTokens {
    pub brand: BrandTokens,
    pub typography: TypographyTokens,
    pub background: BackgroundTokens,
    pub text: TextTokens,
    pub border: BorderTokens,
    pub surface: SurfaceTokens,
    pub shadow: ShadowTokens,
    pub accent: AccentTokens,
}

const TYPOGRAPHY: TypographyTokens = TypographyTokens {
    font_family: "Inter, system-ui, sans-serif",
    font_family_mono: "JetBrains Mono, ui-monospace, monospace",
    font_size_base: "14px",
    font_size_small: "12px",
    font_weight_medium: "500",
};

/// Light admin chrome
pub const LIGHT: AdminThemeTokens = AdminThemeTokens {
    brand: BrandTokens {
        primary: "#4f46e5",
        primary_hover: "#4338ca",
        on_primary: "#ffffff",
    },
    typography: TYPOGRAPHY,
    background: BackgroundTokens {
        app: "#f8fafc",
        sidebar: "#ffffff",
        topbar: "#ffffff",
        canvas: "#f1f5f9",
    },
    text: TextTokens {
        primary: "#0f172a",
        secondary: "#475569",
        muted: "#94a3b8",
        inverse: "#ffffff",
    },
    border: BorderTokens {
        default: "#e2e8f0",
        subtle: "#f1f5f9",
        strong: "#cbd5e1",
    },
    surface: SurfaceTokens {
        card: "#ffffff",
        raised: "#ffffff",
        hover: "#f1f5f9",
        active: "#e2e8f0",
    },
    shadow: ShadowTokens {
        sm: "0 1px 2px rgba(15, 23, 42, 0.06)",
        md: "0 4px 12px rgba(15, 23, 42, 0.08)",
        lg: "0 12px 32px rgba(15, 23, 42, 0.16)",
    },
    accent: AccentTokens {
        default: "#4f46e5",
        subtle: "#eef2ff",
        success: "#16a34a",
        warning: "#d97706",
        danger: "#dc2626",
    },
};

/// Dark admin chrome
pub const DARK: AdminThemeTokens = AdminThemeTokens {
    brand: BrandTokens {
        primary: "#818cf8",
        primary_hover: "#a5b4fc",
        on_primary: "#0f172a",
    },
    typography: TYPOGRAPHY,
    background: BackgroundTokens {
        app: "#0b1120",
        sidebar: "#111827",
        topbar: "#111827",
        canvas: "#020617",
    },
    text: TextTokens {
        primary: "#f1f5f9",
        secondary: "#cbd5e1",
        muted: "#64748b",
        inverse: "#0f172a",
    },
    border: BorderTokens {
        default: "#1f2937",
        subtle: "#111827",
        strong: "#334155",
    },
    surface: SurfaceTokens {
        card: "#111827",
        raised: "#1e293b",
        hover: "#1f2937",
        active: "#334155",
    },
    shadow: ShadowTokens {
        sm: "0 1px 2px rgba(0, 0, 0, 0.4)",
        md: "0 4px 12px rgba(0, 0, 0, 0.5)",
        lg: "0 12px 32px rgba(0, 0, 0, 0.6)",
    },
    accent: AccentTokens {
        default: "#818cf8",
        subtle: "#1e1b4b",
        success: "#22c55e",
        warning: "#f59e0b",
        danger: "#f87171",
    },
};

impl AdminThemeTokens {
    pub fn for_mode(mode: ChromeMode) -> &'static AdminThemeTokens {
        match mode {
            ChromeMode::Light => &LIGHT,
            ChromeMode::Dark => &DARK,
        }
    }

    /// Generate the CSS variable map under [`CHROME_PREFIX`]
    pub fn to_css_variables(&self) -> IndexMap<String, String> {
        self.to_css_variables_with(CHROME_PREFIX)
    }

    /// Generate the CSS variable map under a custom prefix
    ///
    /// Every field maps to exactly one property.
    pub fn to_css_variables_with(&self, prefix: &str) -> IndexMap<String, String> {
        let mut vars = IndexMap::with_capacity(32);
        let mut put = |name: &str, value: &str| {
            vars.insert(format!("{prefix}{name}"), value.to_string());
        };

        put("brand-primary", self.brand.primary);
        put("brand-primary-hover", self.brand.primary_hover);
        put("brand-on-primary", self.brand.on_primary);

        put("font-family", self.typography.font_family);
        put("font-family-mono", self.typography.font_family_mono);
        put("font-size-base", self.typography.font_size_base);
        put("font-size-small", self.typography.font_size_small);
        put("font-weight-medium", self.typography.font_weight_medium);

        put("bg-app", self.background.app);
        put("bg-sidebar", self.background.sidebar);
        put("bg-topbar", self.background.topbar);
        put("bg-canvas", self.background.canvas);

        put("text-primary", self.text.primary);
        put("text-secondary", self.text.secondary);
        put("text-muted", self.text.muted);
        put("text-inverse", self.text.inverse);

        put("border", self.border.default);
        put("border-subtle", self.border.subtle);
        put("border-strong", self.border.strong);

        put("surface-card", self.surface.card);
        put("surface-raised", self.surface.raised);
        put("surface-hover", self.surface.hover);
        put("surface-active", self.surface.active);

        put("shadow-sm", self.shadow.sm);
        put("shadow-md", self.shadow.md);
        put("shadow-lg", self.shadow.lg);

        put("accent", self.accent.default);
        put("accent-subtle", self.accent.subtle);
        put("accent-success", self.accent.success);
        put("accent-warning", self.accent.warning);
        put("accent-danger", self.accent.danger);

        vars
    }
}
