use crate::config::DesktopLayer;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};

fn shell_layer(layer: DesktopLayer) -> Option<Layer> {
    match layer {
        DesktopLayer::Normal => None,
        DesktopLayer::Background => Some(Layer::Background),
        DesktopLayer::Bottom => Some(Layer::Bottom),
    }
}

/// Pins the window under other windows as a desktop widget. Leaves it as an
/// ordinary toplevel for `DesktopLayer::Normal` or when the compositor has
/// no layer-shell support.
pub fn init_layer_shell(window: &gtk::ApplicationWindow, layer: DesktopLayer) {
    let Some(layer) = shell_layer(layer) else {
        return;
    };
    if !gtk4_layer_shell::is_supported() {
        log::warn!("Compositor lacks layer-shell support, opening a normal window");
        return;
    }

    window.init_layer_shell();
    window.set_layer(layer);
    window.set_namespace(Some("ringclock"));
    window.set_exclusive_zone(-1);
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(KeyboardMode::None);
    window.add_css_class("desktop-layer");
}
