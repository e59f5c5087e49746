//! The table of lockdown listener rules.
//!
//! Each rule matches one kind of [`HostEvent`] and decides, against a fresh
//! capability snapshot, whether the event is an anomaly. One-shot rules
//! disarm after their first delivery; repeated rules stay armed for the
//! whole session.

use crate::lockdown::host::{HostCapabilities, HostEvent};

/// One entry of the listener table.
pub struct ListenerRule {
    /// Stable name, used in logs and for disarm bookkeeping.
    pub name: &'static str,
    /// Whether the rule stays armed after firing.
    pub repeated: bool,
    /// Whether the rule reacts to this event at all.
    pub matches: fn(&HostEvent) -> bool,
    /// The anomaly reason, if the event is a violation under current
    /// capabilities. `None` means the event was benign for this rule.
    pub reason: fn(&HostCapabilities, &HostEvent) -> Option<&'static str>,
}

/// The full rule set, mirroring the events a proctored exam watches for.
pub const RULES: &[ListenerRule] = &[
    ListenerRule {
        name: "mouseout",
        repeated: false,
        matches: |e| matches!(e, HostEvent::MouseOut { .. }),
        reason: |_caps, e| match e {
            HostEvent::MouseOut { left_window: true } => {
                Some("moved the mouse out of the window")
            }
            _ => None,
        },
    },
    ListenerRule {
        name: "fullscreenchange",
        repeated: false,
        matches: |e| matches!(e, HostEvent::FullscreenChange),
        reason: |caps, _e| (!caps.geometry.is_fullscreen()).then_some("left fullscreen"),
    },
    ListenerRule {
        name: "resize",
        repeated: false,
        matches: |e| matches!(e, HostEvent::Resize),
        reason: |caps, _e| (!caps.geometry.is_fullscreen()).then_some("resized window"),
    },
    ListenerRule {
        name: "blur",
        repeated: false,
        matches: |e| matches!(e, HostEvent::Blur),
        reason: |_caps, _e| Some("unfocused the window"),
    },
    ListenerRule {
        name: "beforeunload",
        repeated: false,
        matches: |e| matches!(e, HostEvent::BeforeUnload),
        reason: |_caps, _e| Some("tried to navigate away"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lockdown::host::{BrowserFamily, WindowGeometry};

    fn caps(fullscreen: bool) -> HostCapabilities {
        let size = if fullscreen { 1080 } else { 900 };
        HostCapabilities {
            browser: BrowserFamily::Firefox,
            geometry: WindowGeometry {
                outer_width: 1920,
                outer_height: size,
                inner_width: 1920,
                inner_height: size,
                screen_width: 1920,
                screen_height: 1080,
            },
        }
    }

    fn fire(event: HostEvent, fullscreen: bool) -> Option<&'static str> {
        RULES
            .iter()
            .find(|r| (r.matches)(&event))
            .and_then(|r| (r.reason)(&caps(fullscreen), &event))
    }

    #[test]
    fn blur_is_always_an_anomaly() {
        assert_eq!(fire(HostEvent::Blur, true), Some("unfocused the window"));
    }

    #[test]
    fn resize_is_benign_while_still_fullscreen() {
        assert_eq!(fire(HostEvent::Resize, true), None);
        assert_eq!(fire(HostEvent::Resize, false), Some("resized window"));
    }

    #[test]
    fn fullscreen_change_checks_fresh_geometry() {
        assert_eq!(fire(HostEvent::FullscreenChange, true), None);
        assert_eq!(
            fire(HostEvent::FullscreenChange, false),
            Some("left fullscreen")
        );
    }

    #[test]
    fn mouseout_only_counts_leaving_the_window() {
        assert_eq!(fire(HostEvent::MouseOut { left_window: false }, true), None);
        assert_eq!(
            fire(HostEvent::MouseOut { left_window: true }, true),
            Some("moved the mouse out of the window")
        );
    }
}
