use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use super::view;
use crate::shared::{InputEvent, RegionId};

// poll for terminal input and turn it into screen events; mouse clicks become
// taps at the clicked cell's center in surface coordinates
pub fn poll_input(timeout: Duration) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(key.code)),
        Event::Mouse(mouse) => Ok(handle_mouse(mouse)),
        _ => Ok(vec![]),
    }
}

fn handle_key(code: KeyCode) -> Vec<InputEvent> {
    match code {
        KeyCode::Esc => vec![InputEvent::Quit],
        KeyCode::Char('`') => vec![InputEvent::ToggleDebug],
        KeyCode::Char('0') => vec![InputEvent::StopAll],
        KeyCode::Char(c) => char_to_region(c).map(InputEvent::Press).into_iter().collect(),
        _ => vec![],
    }
}

fn handle_mouse(mouse: MouseEvent) -> Vec<InputEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let (x, y) = view::tap_point(mouse.column, mouse.row);
            vec![InputEvent::Tap { x, y }]
        }
        _ => vec![],
    }
}

// convert char to region, laid out like the panel
fn char_to_region(c: char) -> Option<RegionId> {
    let id = match c {
        '1' => RegionId::loop_button(0),
        '2' => RegionId::loop_button(1),
        '3' => RegionId::loop_button(2),
        '4' => RegionId::loop_button(3),
        'q' => RegionId::pad(0), 'w' => RegionId::pad(1), 'e' => RegionId::pad(2), 'r' => RegionId::pad(3),
        'a' => RegionId::pad(4), 's' => RegionId::pad(5), 'd' => RegionId::pad(6), 'f' => RegionId::pad(7),
        'z' => RegionId::pad(8), 'x' => RegionId::pad(9), 'c' => RegionId::pad(10), 'v' => RegionId::pad(11),
        _ => return None,
    };
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn left_click_is_a_tap_at_the_cell_center() {
        let events = handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 3));
        assert_eq!(events, vec![InputEvent::Tap { x: 10.5, y: 7.0 }]);
    }

    #[test]
    fn other_mouse_events_are_ignored() {
        assert!(handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 1, 1)).is_empty());
        assert!(handle_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)).is_empty());
        assert!(handle_mouse(mouse(MouseEventKind::Moved, 1, 1)).is_empty());
    }

    #[test]
    fn number_row_toggles_loops_and_letter_block_hits_pads() {
        assert_eq!(handle_key(KeyCode::Char('1')), vec![InputEvent::Press(RegionId::loop_button(0))]);
        assert_eq!(handle_key(KeyCode::Char('4')), vec![InputEvent::Press(RegionId::loop_button(3))]);
        assert_eq!(handle_key(KeyCode::Char('q')), vec![InputEvent::Press(RegionId::pad(0))]);
        assert_eq!(handle_key(KeyCode::Char('f')), vec![InputEvent::Press(RegionId::pad(7))]);
        assert_eq!(handle_key(KeyCode::Char('v')), vec![InputEvent::Press(RegionId::pad(11))]);
    }

    #[test]
    fn control_keys() {
        assert_eq!(handle_key(KeyCode::Esc), vec![InputEvent::Quit]);
        assert_eq!(handle_key(KeyCode::Char('`')), vec![InputEvent::ToggleDebug]);
        assert_eq!(handle_key(KeyCode::Char('0')), vec![InputEvent::StopAll]);
        assert!(handle_key(KeyCode::Char('m')).is_empty());
        assert!(handle_key(KeyCode::Enter).is_empty());
    }
}
