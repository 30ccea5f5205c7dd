//! Action identifiers, custom actions and the action-bar order

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a bindable action. Built-in actions occupy a small fixed
/// range; custom actions start at [`ActionId::CUSTOM_BASE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(pub i32);

impl ActionId {
    pub const NONE: ActionId = ActionId(0);
    pub const SHOW_KEYBOARD: ActionId = ActionId(1);
    pub const CROP_ACTIVE_WINDOW_TOGGLE: ActionId = ActionId(2);
    pub const TOGGLE_OVERLAY_GROUP_1: ActionId = ActionId(3);
    pub const TOGGLE_OVERLAY_GROUP_2: ActionId = ActionId(4);
    pub const TOGGLE_OVERLAY_GROUP_3: ActionId = ActionId(5);
    pub const SWITCH_TASK: ActionId = ActionId(6);

    /// One past the last built-in action
    pub const BUILT_IN_END: i32 = 7;

    /// First custom action id
    pub const CUSTOM_BASE: i32 = 1000;

    pub fn custom(index: usize) -> ActionId {
        ActionId(Self::CUSTOM_BASE + index as i32)
    }

    /// Built-in actions that can appear on the action bar (excludes `NONE`)
    pub fn built_ins() -> impl Iterator<Item = ActionId> {
        (Self::SHOW_KEYBOARD.0..Self::BUILT_IN_END).map(ActionId)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One slot of an action bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBarEntry {
    pub action: ActionId,
    pub visible: bool,
}

impl ActionBarEntry {
    pub fn new(action: ActionId, visible: bool) -> Self {
        Self { action, visible }
    }
}

/// What a custom action does when triggered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomActionFunction {
    PressKeys { key_codes: [i32; 3], toggle_keys: bool },
    TypeString { text: String },
    LaunchApplication { executable_path: String, arguments: String },
    ToggleOverlayEnabledState { overlay_id: i32 },
}

/// Discriminant of [`CustomActionFunction`], as written to `FunctionType`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomActionKind {
    PressKeys,
    TypeString,
    LaunchApplication,
    ToggleOverlayEnabledState,
}

impl CustomActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomActionKind::PressKeys => "PressKeys",
            CustomActionKind::TypeString => "TypeString",
            CustomActionKind::LaunchApplication => "LaunchApplication",
            CustomActionKind::ToggleOverlayEnabledState => "ToggleOverlayEnabledState",
        }
    }

    /// Unknown strings fall back to `PressKeys`
    pub fn parse(text: &str) -> Self {
        match text {
            "TypeString" => CustomActionKind::TypeString,
            "LaunchApplication" => CustomActionKind::LaunchApplication,
            "ToggleOverlayEnabledState" => CustomActionKind::ToggleOverlayEnabledState,
            _ => CustomActionKind::PressKeys,
        }
    }
}

impl CustomActionFunction {
    pub fn kind(&self) -> CustomActionKind {
        match self {
            CustomActionFunction::PressKeys { .. } => CustomActionKind::PressKeys,
            CustomActionFunction::TypeString { .. } => CustomActionKind::TypeString,
            CustomActionFunction::LaunchApplication { .. } => CustomActionKind::LaunchApplication,
            CustomActionFunction::ToggleOverlayEnabledState { .. } => {
                CustomActionKind::ToggleOverlayEnabledState
            }
        }
    }
}

/// User-defined action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAction {
    pub name: String,
    pub function: CustomActionFunction,
    #[serde(default)]
    pub icon_filename: String,
}

/// Custom actions plus the global action-bar order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionRegistry {
    pub custom_actions: Vec<CustomAction>,
    pub main_bar_order: Vec<ActionBarEntry>,
}

impl ActionRegistry {
    /// Whether `id` names `NONE`, a built-in action, or an existing custom action
    pub fn is_valid(&self, id: ActionId) -> bool {
        let custom_end = ActionId::CUSTOM_BASE as i64 + self.custom_actions.len() as i64;
        (0..ActionId::BUILT_IN_END).contains(&id.0)
            || (ActionId::CUSTOM_BASE as i64..custom_end).contains(&(id.0 as i64))
    }

    /// Every action that belongs on the bar: built-ins, then custom actions
    fn all_bar_actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        ActionId::built_ins().chain((0..self.custom_actions.len()).map(ActionId::custom))
    }

    /// Bring a loaded main-bar order into a usable shape: an empty order gets
    /// every action (hidden); otherwise unknown ids are dropped and missing
    /// ones appended hidden.
    pub fn normalize_main_bar_order(&mut self) {
        if self.main_bar_order.is_empty() {
            self.main_bar_order = self
                .all_bar_actions()
                .map(|id| ActionBarEntry::new(id, false))
                .collect();
            return;
        }

        let mut order = std::mem::take(&mut self.main_bar_order);
        order.retain(|entry| self.is_valid(entry.action));

        let missing: Vec<ActionId> = self
            .all_bar_actions()
            .filter(|id| !order.iter().any(|entry| entry.action == *id))
            .collect();
        order.extend(missing.into_iter().map(|id| ActionBarEntry::new(id, false)));

        self.main_bar_order = order;
    }

    /// Replace an invalid binding with `NONE`
    pub fn validated(&self, id: ActionId) -> ActionId {
        if self.is_valid(id) { id } else { ActionId::NONE }
    }
}

/// Parse an action order string of `<id> <0|1><sep>` triples.
///
/// Parsing stops at the first element that fails; everything before it is
/// kept. The separator can be any non-whitespace character.
pub fn parse_action_order(text: &str) -> Vec<ActionBarEntry> {
    let mut cursor = Cursor::new(text);
    let mut order = Vec::new();

    loop {
        let Some(id) = cursor.next_int() else { break };
        let visible = match cursor.next_int() {
            Some(0) => false,
            Some(1) => true,
            _ => break,
        };
        if cursor.next_char().is_none() {
            break;
        }
        let Ok(id) = i32::try_from(id) else { break };
        order.push(ActionBarEntry::new(ActionId(id), visible));
    }

    order
}

/// Inverse of [`parse_action_order`]
pub fn format_action_order(order: &[ActionBarEntry]) -> String {
    order
        .iter()
        .map(|entry| format!("{} {};", entry.action, u8::from(entry.visible)))
        .collect()
}

/// Whitespace-skipping scanner over an ASCII-oriented string
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    /// Optional sign followed by at least one digit
    fn next_int(&mut self) -> Option<i64> {
        self.skip_whitespace();
        let bytes = self.rest.as_bytes();
        let sign_len = usize::from(matches!(bytes.first(), Some(b'-') | Some(b'+')));
        let digit_len = bytes[sign_len..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digit_len == 0 {
            return None;
        }

        let (number, rest) = self.rest.split_at(sign_len + digit_len);
        let value = number.parse::<i64>().ok()?;
        self.rest = rest;
        Some(value)
    }

    fn next_char(&mut self) -> Option<char> {
        self.skip_whitespace();
        let mut chars = self.rest.chars();
        let c = chars.next()?;
        self.rest = chars.as_str();
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(i32, bool)]) -> Vec<ActionBarEntry> {
        pairs.iter().map(|&(id, v)| ActionBarEntry::new(ActionId(id), v)).collect()
    }

    #[test]
    fn test_parse_action_order() {
        assert_eq!(parse_action_order("3 1;7 0;"), entries(&[(3, true), (7, false)]));
    }

    #[test]
    fn test_parse_action_order_stops_at_garbage() {
        assert_eq!(parse_action_order("3 1;garbage"), entries(&[(3, true)]));
        // Missing separator on the last element drops it
        assert_eq!(parse_action_order("3 1;7 0"), entries(&[(3, true)]));
        // Visibility must be 0 or 1
        assert_eq!(parse_action_order("3 1;4 2;5 0;"), entries(&[(3, true)]));
        assert!(parse_action_order("").is_empty());
    }

    #[test]
    fn test_parse_action_order_tolerates_whitespace() {
        assert_eq!(
            parse_action_order("  1 0 ;\t1000 1;"),
            entries(&[(1, false), (1000, true)])
        );
    }

    #[test]
    fn test_format_action_order() {
        let order = entries(&[(3, true), (7, false)]);
        assert_eq!(format_action_order(&order), "3 1;7 0;");
        assert_eq!(parse_action_order(&format_action_order(&order)), order);
    }

    #[test]
    fn test_custom_action_kind_strings() {
        for kind in [
            CustomActionKind::PressKeys,
            CustomActionKind::TypeString,
            CustomActionKind::LaunchApplication,
            CustomActionKind::ToggleOverlayEnabledState,
        ] {
            assert_eq!(CustomActionKind::parse(kind.as_str()), kind);
        }
        assert_eq!(CustomActionKind::parse("Bogus"), CustomActionKind::PressKeys);
    }

    fn registry_with_customs(count: usize) -> ActionRegistry {
        ActionRegistry {
            custom_actions: (0..count)
                .map(|i| CustomAction {
                    name: format!("Action{i}"),
                    function: CustomActionFunction::TypeString { text: String::new() },
                    icon_filename: String::new(),
                })
                .collect(),
            main_bar_order: Vec::new(),
        }
    }

    #[test]
    fn test_is_valid() {
        let registry = registry_with_customs(2);

        assert!(registry.is_valid(ActionId::NONE));
        assert!(registry.is_valid(ActionId::SWITCH_TASK));
        assert!(!registry.is_valid(ActionId(ActionId::BUILT_IN_END)));
        assert!(registry.is_valid(ActionId(1001)));
        assert!(!registry.is_valid(ActionId(1002)));
        assert!(!registry.is_valid(ActionId(-1)));
        assert_eq!(registry.validated(ActionId(500)), ActionId::NONE);
    }

    #[test]
    fn test_normalize_empty_order() {
        let mut registry = registry_with_customs(1);
        registry.normalize_main_bar_order();

        let ids: Vec<i32> = registry.main_bar_order.iter().map(|e| e.action.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 1000]);
        assert!(registry.main_bar_order.iter().all(|e| !e.visible));
    }

    #[test]
    fn test_normalize_drops_invalid_and_appends_missing() {
        let mut registry = registry_with_customs(1);
        registry.main_bar_order = entries(&[(1000, true), (42, true), (2, true), (1001, true)]);
        registry.normalize_main_bar_order();

        assert_eq!(
            registry.main_bar_order,
            entries(&[
                (1000, true),
                (2, true),
                (1, false),
                (3, false),
                (4, false),
                (5, false),
                (6, false),
            ])
        );
    }
}
