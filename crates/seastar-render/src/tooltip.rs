//! Hover-driven tooltip state machine.
//!
//! The controller owns no timers and never reads a clock: hosts feed it
//! pointer events and periodic ticks stamped with their own monotonic
//! milliseconds, and it answers with show/hide commands. That keeps the
//! debounce semantics (leave-delay, last-write-wins, cancel-on-reenter) fully
//! deterministic and testable.

use seastar_core::GraphNode;

pub const DEFAULT_FADE_MS: f64 = 150.0;
pub const DEFAULT_HIDE_DELAY_MS: f64 = 300.0;

const LINK_DISPLAY_MAX_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipState {
    Hidden,
    /// Show command issued, fade-in still running.
    Showing,
    Visible,
    /// Hide command issued, fade-out still running.
    Hiding,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLink {
    pub href: String,
    /// Truncated form for display.
    pub display: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub text: String,
    pub link: Option<TooltipLink>,
}

impl TooltipContent {
    /// Entity context when present, else the display label, else the id.
    pub fn for_node(node: &GraphNode) -> Self {
        let text = node
            .context
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| Some(node.label.clone()).filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| node.id.clone());
        let link = node.citation_url.as_deref().map(|raw| TooltipLink {
            href: raw.to_string(),
            display: display_url(raw),
        });
        Self { text, link }
    }
}

/// Compact display form of a citation URL: scheme stripped, truncated with an
/// ellipsis. Unparseable URLs just truncate as-is.
fn display_url(raw: &str) -> String {
    let compact = match url::Url::parse(raw) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default().to_string();
            let path = parsed.path().trim_end_matches('/');
            format!("{host}{path}")
        }
        Err(_) => raw.to_string(),
    };
    if compact.chars().count() <= LINK_DISPLAY_MAX_CHARS {
        return compact;
    }
    let mut out: String = compact.chars().take(LINK_DISPLAY_MAX_CHARS - 1).collect();
    out.push('…');
    out
}

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipCommand {
    Show {
        node_id: String,
        content: TooltipContent,
        /// Anchor for the tooltip box, typically the pointer position.
        x: f64,
        y: f64,
        fade_ms: f64,
    },
    Hide {
        fade_ms: f64,
    },
}

/// One controller per rendered graph; at most one tooltip and one pending
/// hide exist at a time.
#[derive(Debug, Clone)]
pub struct TooltipController {
    state: TooltipState,
    active_node: Option<String>,
    fade_ms: f64,
    hide_delay_ms: f64,
    fade_ends_at: Option<f64>,
    hide_at: Option<f64>,
}

impl Default for TooltipController {
    fn default() -> Self {
        Self::new()
    }
}

impl TooltipController {
    pub fn new() -> Self {
        Self::with_timing(DEFAULT_FADE_MS, DEFAULT_HIDE_DELAY_MS)
    }

    pub fn with_timing(fade_ms: f64, hide_delay_ms: f64) -> Self {
        Self {
            state: TooltipState::Hidden,
            active_node: None,
            fade_ms,
            hide_delay_ms,
            fade_ends_at: None,
            hide_at: None,
        }
    }

    pub fn state(&self) -> TooltipState {
        self.state
    }

    pub fn active_node(&self) -> Option<&str> {
        self.active_node.as_deref()
    }

    /// Pointer entered a node's label region at `(x, y)`. Cancels any pending
    /// hide. When the same node is already the active target the tooltip
    /// stays where it is (no command), avoiding jitter on re-entry.
    pub fn pointer_enter(
        &mut self,
        node: &GraphNode,
        x: f64,
        y: f64,
        at: f64,
    ) -> Option<TooltipCommand> {
        self.hide_at = None;

        let same_target = self.active_node.as_deref() == Some(node.id.as_str());
        if same_target && matches!(self.state, TooltipState::Showing | TooltipState::Visible) {
            return None;
        }

        self.active_node = Some(node.id.clone());
        self.state = TooltipState::Showing;
        self.fade_ends_at = Some(at + self.fade_ms);
        Some(TooltipCommand::Show {
            node_id: node.id.clone(),
            content: TooltipContent::for_node(node),
            x,
            y,
            fade_ms: self.fade_ms,
        })
    }

    /// Pointer left the node. Schedules a hide after the configured delay so
    /// the pointer can travel onto the tooltip. A newer leave overwrites any
    /// older pending hide.
    pub fn pointer_leave(&mut self, at: f64) {
        if self.state == TooltipState::Hidden {
            return;
        }
        self.hide_at = Some(at + self.hide_delay_ms);
    }

    /// Pointer entered the tooltip itself: the pending hide is cancelled.
    pub fn tooltip_pointer_enter(&mut self) {
        self.hide_at = None;
    }

    /// Advances the machine to `now`, firing at most one command.
    pub fn tick(&mut self, now: f64) -> Option<TooltipCommand> {
        if self.state == TooltipState::Showing
            && self.fade_ends_at.is_some_and(|t| now >= t)
        {
            self.state = TooltipState::Visible;
            self.fade_ends_at = None;
        }

        if matches!(self.state, TooltipState::Showing | TooltipState::Visible)
            && self.hide_at.is_some_and(|t| now >= t)
        {
            self.hide_at = None;
            self.state = TooltipState::Hiding;
            self.fade_ends_at = Some(now + self.fade_ms);
            return Some(TooltipCommand::Hide {
                fade_ms: self.fade_ms,
            });
        }

        if self.state == TooltipState::Hiding
            && self.fade_ends_at.is_some_and(|t| now >= t)
        {
            self.state = TooltipState::Hidden;
            self.active_node = None;
            self.fade_ends_at = None;
        }

        None
    }
}
