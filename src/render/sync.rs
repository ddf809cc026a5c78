use std::f32::consts::TAU;

use crate::game::GameState;

use super::scene::{BoxHandle, Material, Renderer, RotationAxis};

/// How far the food box turns per synced frame
const FOOD_SPIN_STEP: f32 = 0.12;

/// Mirrors logical state into renderer boxes, one handle per segment.
///
/// The simulation owns segment identity; this layer only keeps the
/// index-to-handle lookup and never feeds anything back. Handles are
/// created on growth and torn down when a run is discarded.
pub struct SceneSync {
    segments: Vec<BoxHandle>,
    food: Option<BoxHandle>,
    food_spin: f32,
}

impl SceneSync {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            food: None,
            food_spin: 0.0,
        }
    }

    /// Bring the renderer's boxes in line with the state: one box per
    /// segment at its cell, plus the food box with a slow spin
    pub fn sync(&mut self, renderer: &mut dyn Renderer, state: &GameState) {
        while self.segments.len() < state.snake.len() {
            let material = if self.segments.is_empty() {
                Material::SnakeHead
            } else {
                Material::SnakeBody
            };
            self.segments.push(renderer.create_box(material));
        }
        while self.segments.len() > state.snake.len() {
            if let Some(handle) = self.segments.pop() {
                renderer.remove(handle);
            }
        }

        for (handle, cell) in self.segments.iter().zip(state.snake.segments()) {
            renderer.set_position(*handle, cell.x as f32, 0.0, cell.z as f32);
        }

        let food = match self.food {
            Some(handle) => handle,
            None => {
                let handle = renderer.create_box(Material::Food);
                self.food = Some(handle);
                handle
            }
        };
        renderer.set_position(food, state.food.x as f32, 0.0, state.food.z as f32);
        self.food_spin = (self.food_spin + FOOD_SPIN_STEP) % TAU;
        renderer.set_rotation(food, RotationAxis::Y, self.food_spin);
    }

    /// Remove every box, used when a run is discarded
    pub fn clear(&mut self, renderer: &mut dyn Renderer) {
        for handle in self.segments.drain(..) {
            renderer.remove(handle);
        }
        if let Some(handle) = self.food.take() {
            renderer.remove(handle);
        }
        self.food_spin = 0.0;
    }
}

impl Default for SceneSync {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, GameState, Mode, Snake};
    use anyhow::Result;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Records renderer calls so tests can check the handle bookkeeping
    struct MockRenderer {
        next_id: u64,
        alive: HashMap<BoxHandle, Material>,
        positions: HashMap<BoxHandle, (f32, f32, f32)>,
        rotations: HashMap<BoxHandle, (RotationAxis, f32)>,
    }

    impl MockRenderer {
        fn new() -> Self {
            Self {
                next_id: 0,
                alive: HashMap::new(),
                positions: HashMap::new(),
                rotations: HashMap::new(),
            }
        }

        fn cells(&self, material: Material) -> Vec<(i32, i32)> {
            let mut cells: Vec<_> = self
                .alive
                .iter()
                .filter(|(_, m)| **m == material)
                .map(|(h, _)| {
                    let (x, _, z) = self.positions[h];
                    (x as i32, z as i32)
                })
                .collect();
            cells.sort_unstable();
            cells
        }
    }

    impl Renderer for MockRenderer {
        fn create_box(&mut self, material: Material) -> BoxHandle {
            let handle = BoxHandle::new(self.next_id);
            self.next_id += 1;
            self.alive.insert(handle, material);
            handle
        }

        fn set_position(&mut self, handle: BoxHandle, x: f32, y: f32, z: f32) {
            assert!(self.alive.contains_key(&handle), "position on dead handle");
            self.positions.insert(handle, (x, y, z));
        }

        fn set_rotation(&mut self, handle: BoxHandle, axis: RotationAxis, radians: f32) {
            assert!(self.alive.contains_key(&handle), "rotation on dead handle");
            self.rotations.insert(handle, (axis, radians));
        }

        fn remove(&mut self, handle: BoxHandle) {
            assert!(self.alive.remove(&handle).is_some(), "double remove");
            self.positions.remove(&handle);
            self.rotations.remove(&handle);
        }

        fn draw_frame(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn state(len: usize) -> GameState {
        GameState::new(
            Snake::new(Cell::new(0, 0), Direction::East, len),
            Cell::new(2, 2),
            Mode::Classic,
            5,
            Duration::from_millis(120),
        )
    }

    #[test]
    fn test_sync_creates_one_box_per_segment_plus_food() {
        let mut renderer = MockRenderer::new();
        let mut scene = SceneSync::new();

        scene.sync(&mut renderer, &state(3));

        assert_eq!(renderer.alive.len(), 4);
        assert_eq!(renderer.cells(Material::SnakeHead), vec![(0, 0)]);
        assert_eq!(
            renderer.cells(Material::SnakeBody),
            vec![(-2, 0), (-1, 0)]
        );
        assert_eq!(renderer.cells(Material::Food), vec![(2, 2)]);
    }

    #[test]
    fn test_growth_adds_exactly_one_box() {
        let mut renderer = MockRenderer::new();
        let mut scene = SceneSync::new();

        scene.sync(&mut renderer, &state(1));
        assert_eq!(renderer.alive.len(), 2);

        scene.sync(&mut renderer, &state(2));
        assert_eq!(renderer.alive.len(), 3);
    }

    #[test]
    fn test_shrink_removes_extra_boxes() {
        let mut renderer = MockRenderer::new();
        let mut scene = SceneSync::new();

        scene.sync(&mut renderer, &state(4));
        scene.sync(&mut renderer, &state(2));

        // 2 segments + food
        assert_eq!(renderer.alive.len(), 3);
    }

    #[test]
    fn test_positions_track_segments() {
        let mut renderer = MockRenderer::new();
        let mut scene = SceneSync::new();
        let mut state = state(2);

        scene.sync(&mut renderer, &state);
        state.snake.advance(Cell::new(1, 0));
        scene.sync(&mut renderer, &state);

        assert_eq!(renderer.cells(Material::SnakeHead), vec![(1, 0)]);
        assert_eq!(renderer.cells(Material::SnakeBody), vec![(0, 0)]);
    }

    #[test]
    fn test_food_box_spins() {
        let mut renderer = MockRenderer::new();
        let mut scene = SceneSync::new();
        let state = state(1);

        scene.sync(&mut renderer, &state);
        let food = scene.food.unwrap();
        let (axis, first) = renderer.rotations[&food];
        assert_eq!(axis, RotationAxis::Y);

        scene.sync(&mut renderer, &state);
        let (_, second) = renderer.rotations[&food];
        assert!(second > first);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut renderer = MockRenderer::new();
        let mut scene = SceneSync::new();

        scene.sync(&mut renderer, &state(3));
        scene.clear(&mut renderer);

        assert!(renderer.alive.is_empty());

        // A later round starts from a clean slate
        scene.sync(&mut renderer, &state(1));
        assert_eq!(renderer.alive.len(), 2);
    }
}
