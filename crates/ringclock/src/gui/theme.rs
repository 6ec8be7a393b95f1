use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Colours for the clock face. Each can be overridden from GTK CSS with
/// `@define-color ringclock_<name> ...;`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub ring: Srgba<f64>,
    pub active_box: Srgba<f64>,
    pub active_text: Srgba<f64>,
    pub inactive_text: Srgba<f64>,
    pub glow: Srgba<f64>,
    pub marker: Srgba<f64>,
    pub marker_glow: Srgba<f64>,
    pub tooltip_bg: Srgba<f64>,
    pub tooltip_border: Srgba<f64>,
    pub tooltip_text: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::pastel()
    }
}

impl ThemeColors {
    /// Pink outlines and highlights on chocolate-brown text.
    pub fn pastel() -> Self {
        let pink = |a: f64| Srgba::new(244.0 / 255.0, 166.0 / 255.0, 184.0 / 255.0, a);
        let brown = |a: f64| Srgba::new(75.0 / 255.0, 46.0 / 255.0, 46.0 / 255.0, a);

        Self {
            ring: pink(0.3),
            active_box: pink(1.0),
            active_text: brown(1.0),
            inactive_text: brown(0.4),
            glow: pink(0.6),
            marker: pink(1.0),
            marker_glow: pink(0.12),
            tooltip_bg: Srgba::new(1.0, 241.0 / 255.0, 241.0 / 255.0, 0.95),
            tooltip_border: Srgba::new(214.0 / 255.0, 138.0 / 255.0, 138.0 / 255.0, 0.9),
            tooltip_text: brown(1.0),
        }
    }

    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let base = Self::pastel();
        Self {
            ring: Self::lookup_color(context, "ringclock_ring", base.ring, None),
            active_box: Self::lookup_color(context, "ringclock_accent", base.active_box, None),
            active_text: Self::lookup_color(context, "ringclock_text", base.active_text, None),
            inactive_text: Self::lookup_color(
                context,
                "ringclock_text",
                base.inactive_text,
                Some(0.4),
            ),
            glow: Self::lookup_color(context, "ringclock_accent", base.glow, Some(0.6)),
            marker: Self::lookup_color(context, "ringclock_marker", base.marker, None),
            marker_glow: Self::lookup_color(
                context,
                "ringclock_marker",
                base.marker_glow,
                Some(0.12),
            ),
            tooltip_bg: Self::lookup_color(context, "ringclock_tooltip_bg", base.tooltip_bg, None),
            tooltip_border: Self::lookup_color(
                context,
                "ringclock_tooltip_border",
                base.tooltip_border,
                None,
            ),
            tooltip_text: Self::lookup_color(context, "ringclock_text", base.tooltip_text, None),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.ringclock-window {
    background-color: #fff6f4;
}
.ringclock-window.desktop-layer, .ringclock-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
