use crate::actions::Dispatch;
use crate::modules::AppModules;
use crate::thunk::ThunkAction;
use crate::view_models::app_view_model::AppViewModel;
use crate::xblock::{Element, XBlockData};
use ns_store::{ActionCreator, Selector, State};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde_json::json;

/// The counter view connected to the store
///
/// Holds the block data plus the action creator, thunk action and selector
/// it was connected to; the count itself always comes from the state.
pub struct App {
    data: XBlockData,
    load_count: ActionCreator,
    update_count: ThunkAction,
    count: Selector,
}

impl App {
    pub fn connect(data: XBlockData, modules: &AppModules) -> anyhow::Result<Self> {
        Ok(Self {
            data,
            load_count: modules.action("counter.load")?.clone(),
            update_count: modules.thunk_action("counter.update_count")?.clone(),
            count: modules.selector("counter.value")?.clone(),
        })
    }

    /// Seed the store with the count the block was rendered with
    pub fn did_mount(&self) -> Dispatch {
        self.load_count.call(&[json!(self.data.count)]).into()
    }

    pub fn on_click(&self) -> Dispatch {
        (self.update_count)(&[]).into()
    }

    pub fn view_model(&self, state: &State, element: &Element) -> AppViewModel {
        AppViewModel::from_state(state, &self.count, element)
    }
}

pub fn render(vm: &AppViewModel, area: Rect, f: &mut Frame) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Counter XBlock ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let count = Paragraph::new(Line::from(vec![
        Span::raw("The current count is "),
        Span::raw(vm.count.as_str()).bold(),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(count, rows[0]);

    let label = Paragraph::new(format!("Block label: {}", vm.label))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(label, rows[1]);

    let button_width = (vm.button.len() as u16 + 4).min(inner.width);
    let button_area = Rect {
        x: inner.x + inner.width.saturating_sub(button_width) / 2,
        y: rows[3].y,
        width: button_width,
        height: rows[3].height,
    };
    let button = Paragraph::new(vm.button)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, button_area);

    let help = Paragraph::new("enter: increment  c: direct increment  q: quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, rows[5]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules;
    use ns_store::Mode;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_count_and_button() {
        let vm = AppViewModel {
            count: "12".to_string(),
            label: "11".to_string(),
            button: "Click me to increment!",
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| render(&vm, f.area(), f)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("The current count is 12"));
        assert!(text.contains("Block label: 11"));
        assert!(text.contains("Click me to increment!"));
    }

    #[test]
    fn test_mount_dispatches_load_of_block_count() {
        let modules = modules::connect(Mode::Development).unwrap();
        let app = App::connect(XBlockData { count: 6 }, &modules).unwrap();

        let Dispatch::Action(action) = app.did_mount() else {
            panic!("mount should dispatch an action");
        };
        assert_eq!(action.kind(), "counter.LOAD");
        assert_eq!(action.field("value"), Some(&json!(6)));
        assert!(matches!(app.on_click(), Dispatch::Thunk(_)));
    }
}
