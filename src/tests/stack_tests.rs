#[cfg(test)]
mod tests {
    use crate::components::Direction;
    use crate::config::TuningConfig;
    use crate::stack::{Placement, Stack, overlap_span};
    use crate::tests::test_utils::{block, moving};

    fn stack_with(target_left: f32, target_width: f32, moving_left: f32, moving_width: f32) -> Stack {
        Stack::from_blocks(
            vec![block(target_left, target_width)],
            moving(moving_left, moving_width, Direction::Right),
            25.0,
        )
        .unwrap()
    }

    #[test]
    fn test_new_stack_has_centred_foundation() {
        let stack = Stack::new(&TuningConfig::default());
        assert_eq!(stack.len(), 1);
        assert!(!stack.is_empty());

        let base = stack.top();
        assert!((base.left - 75.0).abs() < f32::EPSILON);
        assert!((base.width - 150.0).abs() < f32::EPSILON);
        assert!((base.top - 575.0).abs() < f32::EPSILON);
        assert_eq!(base.color_index, 0);

        assert!((stack.moving().width - 150.0).abs() < f32::EPSILON);
        assert!((stack.moving_top() - 550.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_blocks_rejects_empty_tower() {
        assert!(Stack::from_blocks(Vec::new(), moving(0.0, 10.0, Direction::Left), 25.0).is_none());
    }

    #[test]
    fn test_overlap_span() {
        let (start, end) = overlap_span(50.0, 100.0, &block(80.0, 140.0));
        assert!((start - 80.0).abs() < f32::EPSILON);
        assert!((end - 150.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_overlap_slices_block() {
        let mut stack = stack_with(80.0, 140.0, 50.0, 100.0);

        let Placement::Landed(placed) = stack.evaluate_placement(0, 8) else {
            panic!("expected a landing");
        };
        assert!((placed.left - 80.0).abs() < f32::EPSILON);
        assert!((placed.width - 70.0).abs() < f32::EPSILON);
        assert!((placed.top - 550.0).abs() < f32::EPSILON);
        assert_eq!(placed.color_index, 1);

        assert_eq!(stack.len(), 2);
        assert_eq!(*stack.top(), placed);
    }

    #[test]
    fn test_disjoint_blocks_miss() {
        let mut stack = stack_with(0.0, 100.0, 200.0, 50.0);

        let placement = stack.evaluate_placement(0, 8);
        let Placement::Miss { overlap } = placement else {
            panic!("expected a miss, got {placement:?}");
        };
        assert!((overlap + 100.0).abs() < f32::EPSILON);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_touching_edges_miss() {
        // Overlap of exactly zero
        let mut stack = stack_with(0.0, 100.0, 100.0, 50.0);
        assert!(matches!(stack.evaluate_placement(0, 8), Placement::Miss { .. }));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_one_unit_overlap_lands() {
        let mut stack = stack_with(0.0, 100.0, 99.0, 50.0);
        let Placement::Landed(placed) = stack.evaluate_placement(0, 8) else {
            panic!("expected a landing");
        };
        assert!((placed.width - 1.0).abs() < f32::EPSILON);
        assert!((placed.left - 99.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_perfect_drop_keeps_width() {
        let mut stack = stack_with(75.0, 150.0, 75.0, 150.0);
        let Placement::Landed(placed) = stack.evaluate_placement(3, 8) else {
            panic!("expected a landing");
        };
        assert!((placed.width - 150.0).abs() < f32::EPSILON);
        assert_eq!(placed.color_index, 4);
    }

    #[test]
    fn test_palette_index_wraps() {
        let mut stack = stack_with(75.0, 150.0, 75.0, 150.0);
        let Placement::Landed(placed) = stack.evaluate_placement(7, 8) else {
            panic!("expected a landing");
        };
        assert_eq!(placed.color_index, 0);
    }

    #[test]
    fn test_widths_never_grow() {
        let mut stack = stack_with(75.0, 150.0, 60.0, 150.0);
        let offsets = [12.0, -7.0, 3.0, 20.0, -15.0, 0.0];

        for (score, offset) in (0u32..).zip(offsets) {
            let top = *stack.top();
            // Drop the next block offset from the target by `offset`
            stack = Stack::from_blocks(
                stack.blocks().to_vec(),
                moving(top.left + offset, top.width, Direction::Right),
                25.0,
            )
            .unwrap();
            assert!(matches!(
                stack.evaluate_placement(score, 8),
                Placement::Landed(_)
            ));
        }

        assert_eq!(stack.len(), offsets.len() + 1);
        for pair in stack.blocks().windows(2) {
            assert!(pair[1].width <= pair[0].width);
            assert!((pair[0].top - pair[1].top - 25.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_moving_block_reflects_off_edges() {
        let mut stack = stack_with(75.0, 150.0, 148.0, 150.0);

        // Right edge passes 300 on this frame
        stack.advance_moving_block(1.0, 300.0);
        assert!((stack.moving().left - 152.0).abs() < f32::EPSILON);
        assert_eq!(stack.moving().direction, Direction::Left);

        stack.advance_moving_block(1.0, 300.0);
        assert!((stack.moving().left - 148.0).abs() < f32::EPSILON);
        assert_eq!(stack.moving().direction, Direction::Left);

        let mut stack = Stack::from_blocks(
            vec![block(75.0, 150.0)],
            moving(2.0, 150.0, Direction::Left),
            25.0,
        )
        .unwrap();
        stack.advance_moving_block(1.0, 300.0);
        assert!((stack.moving().left + 2.0).abs() < f32::EPSILON);
        assert_eq!(stack.moving().direction, Direction::Right);
    }

    #[test]
    fn test_time_scale_doubles_delta() {
        let mut single = stack_with(75.0, 150.0, 50.0, 100.0);
        let mut double = single.clone();

        single.advance_moving_block(1.0, 300.0);
        double.advance_moving_block(2.0, 300.0);

        let single_delta = single.moving().left - 50.0;
        let double_delta = double.moving().left - 50.0;
        assert!((double_delta - 2.0 * single_delta).abs() < 1e-5);
    }

    #[test]
    fn test_respawn_starts_off_the_far_edge() {
        let mut stack = stack_with(80.0, 70.0, 0.0, 150.0);

        stack.respawn_moving_block(Direction::Right, 4.2, 300.0);
        assert!((stack.moving().left + 70.0).abs() < f32::EPSILON);
        assert!((stack.moving().width - 70.0).abs() < f32::EPSILON);
        assert!((stack.moving().speed - 4.2).abs() < f32::EPSILON);

        stack.respawn_moving_block(Direction::Left, 4.2, 300.0);
        assert!((stack.moving().left - 300.0).abs() < f32::EPSILON);
        assert_eq!(stack.moving().direction, Direction::Left);
    }

    #[test]
    fn test_nan_position_misses() {
        let mut stack = stack_with(75.0, 150.0, f32::NAN, 150.0);
        let placement = stack.evaluate_placement(0, 8);
        assert!(matches!(placement, Placement::Miss { .. }), "got {placement:?}");
        assert_eq!(stack.len(), 1);
    }
}
