#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::app::{App, FixedStepTimeSource};
    use crate::components::Direction;
    use crate::config::Config;
    use crate::leaderboard::MemoryScoreStore;
    use crate::round::Simulation;
    use crate::stack::Stack;
    use crate::tests::test_utils::moving;
    use crate::ui::{self, board_cells, centered_rect, palette_color};
    use ratatui::{backend::TestBackend, layout::Rect, prelude::*};

    // Helper function to create a test terminal
    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    fn create_test_app() -> App {
        App::with_time_source(
            &Config::default(),
            MemoryScoreStore::new(),
            Box::new(FixedStepTimeSource::new(0.0, 1000.0 / 60.0)),
            3,
        )
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 100);
        let centered = centered_rect(50, 40, area);

        assert_eq!(centered.width, 50);
        assert_eq!(centered.height, 40);
        assert_eq!(centered.x, 25);
        assert_eq!(centered.y, 30);
    }

    #[test]
    fn test_board_cells_for_default_viewport() {
        let app = create_test_app();
        assert_eq!(board_cells(app.simulation()), (60, 24));
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), palette_color(8));
        assert_ne!(palette_color(0), palette_color(1));
    }

    #[test]
    fn test_render_idle_screen() {
        let app = create_test_app();
        let mut terminal = create_test_terminal(100, 32);

        terminal.draw(|f| ui::render(f, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("CHICK STACK"));
        assert!(text.contains("Press Space or click"));
        assert!(text.contains("Player: Anonymous"));
        assert!(text.contains('█'));
        assert!(text.contains('@'));
    }

    #[test]
    fn test_render_small_terminal_warning() {
        let app = create_test_app();
        let mut terminal = create_test_terminal(40, 12);

        terminal.draw(|f| ui::render(f, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Terminal too small!"));
        assert!(!text.contains("CHICK STACK"));
    }

    #[test]
    fn test_render_active_round() {
        let mut app = create_test_app();
        app.on_drop();
        for _ in 0..30 {
            app.on_frame();
        }
        let mut terminal = create_test_terminal(100, 32);

        terminal.draw(|f| ui::render(f, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(!text.contains("Press Space or click"));
        assert!(text.contains("Score: 0"));
        assert!(text.contains('▓'));
    }

    #[test]
    fn test_render_follows_camera() {
        let mut app = create_test_app();
        app.on_drop();
        // Ten exact drops scroll the view by three rows
        for _ in 0..10 {
            {
                let mut simulation = app.world.resource_mut::<Simulation>();
                let top = *simulation.stack().top();
                let mut aligned = moving(top.left, top.width, Direction::Right);
                aligned.speed = simulation.round().speed;
                simulation.stack =
                    Stack::from_blocks(simulation.stack().blocks().to_vec(), aligned, 25.0).unwrap();
            }
            app.on_drop();
        }
        assert!((app.simulation().camera_offset() - 75.0).abs() < f32::EPSILON);

        let mut terminal = create_test_terminal(100, 32);
        terminal.draw(|f| ui::render(f, &app)).unwrap();
        let buffer = terminal.backend().buffer();

        // Board rows start below the title and the top border
        let block_rows: Vec<u16> = (3..27)
            .filter(|&y| (1..61).any(|x| buffer[(x, y)].symbol() == "█"))
            .collect();
        // Newest block at row 16, the three lowest pushed off the bottom
        assert_eq!(block_rows, (19..27).collect::<Vec<_>>());
    }
}
