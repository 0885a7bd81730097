use crate::state::SortKey;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    PoolLeft,
    PoolRight,
    Sort(SortKey),
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Esc, _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Left,  _) => Action::PoolLeft,
        (KeyCode::Right, _) => Action::PoolRight,

        // Sort selection is case sensitive: A/U are await/util, u is used
        (KeyCode::Char('u'), _) => Action::Sort(SortKey::Used),
        (KeyCode::Char('t'), _) => Action::Sort(SortKey::Tps),
        (KeyCode::Char('r'), _) => Action::Sort(SortKey::Read),
        (KeyCode::Char('w'), _) => Action::Sort(SortKey::Write),
        (KeyCode::Char('A'), _) => Action::Sort(SortKey::Await),
        (KeyCode::Char('U'), _) => Action::Sort(SortKey::Util),

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        key_mod(code, KeyModifiers::NONE)
    }

    fn key_mod(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent { code, modifiers, kind: KeyEventKind::Press, state: KeyEventState::NONE }
    }

    #[test]
    fn quit_keys() {
        assert_eq!(handle_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(handle_key(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(handle_key(key_mod(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit);
    }

    #[test]
    fn plain_c_is_not_quit() {
        assert_eq!(handle_key(key(KeyCode::Char('c'))), Action::None);
    }

    #[test]
    fn pool_navigation() {
        assert_eq!(handle_key(key(KeyCode::Left)), Action::PoolLeft);
        assert_eq!(handle_key(key(KeyCode::Right)), Action::PoolRight);
    }

    #[test]
    fn sort_keys_are_case_sensitive() {
        assert_eq!(handle_key(key(KeyCode::Char('u'))), Action::Sort(SortKey::Used));
        assert_eq!(handle_key(key_mod(KeyCode::Char('U'), KeyModifiers::SHIFT)), Action::Sort(SortKey::Util));
        assert_eq!(handle_key(key_mod(KeyCode::Char('A'), KeyModifiers::SHIFT)), Action::Sort(SortKey::Await));
        assert_eq!(handle_key(key(KeyCode::Char('t'))), Action::Sort(SortKey::Tps));
        assert_eq!(handle_key(key(KeyCode::Char('r'))), Action::Sort(SortKey::Read));
        assert_eq!(handle_key(key(KeyCode::Char('w'))), Action::Sort(SortKey::Write));
    }

    #[test]
    fn name_and_discard_have_no_binding() {
        assert_eq!(handle_key(key(KeyCode::Char('n'))), Action::None);
        assert_eq!(handle_key(key(KeyCode::Char('d'))), Action::None);
        assert_eq!(handle_key(key(KeyCode::Char('a'))), Action::None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut k = key(KeyCode::Char('q'));
        k.kind = KeyEventKind::Release;
        assert_eq!(handle_key(k), Action::None);
    }
}
