//=========================================================================
// Transition Queue
//=========================================================================
//
// Queue for scene transitions requested from inside scene hooks.
//
// Scenes push commands through their SceneContext while a hook runs. The
// scene manager applies the queue in FIFO order once the public operation
// that dispatched the hook returns.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{ClassRef, InstanceId, SceneArgs};

//=== SceneCommand ========================================================

/// Deferred scene manager operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    /// Spawns a scene of `class`, makes it current and initializes it.
    Spawn {
        class: ClassRef,
        args: SceneArgs,
        silent: bool,
    },

    /// Makes an existing instance current.
    Activate { instance_id: InstanceId, silent: bool },

    /// Removes an instance (no-op when absent).
    Remove(InstanceId),

    /// Removes the current scene, then spawns `class`.
    SpawnRemove { class: ClassRef, args: SceneArgs },

    /// Asks the display driver to stop after the current frame.
    StopDisplay,
}

//=== Transition Queue ====================================================

/// FIFO queue of [`SceneCommand`]s.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<SceneCommand>,
}

impl TransitionQueue {
    /// Creates a new empty transition queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a command for the next processing pass.
    pub fn push(&mut self, command: SceneCommand) {
        self.queue.push(command);
    }

    /// Returns an iterator over the queued commands in FIFO order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneCommand> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all commands from the queue, leaving it empty.
    ///
    /// Commands pushed while the taken batch is applied land in the now
    /// empty queue and are picked up by the next pass.
    pub fn take(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::ClassId;

    #[test]
    fn take_preserves_fifo_order_and_empties() {
        let mut queue = TransitionQueue::new();
        queue.push(SceneCommand::Remove(InstanceId(1)));
        queue.push(SceneCommand::Activate {
            instance_id: InstanceId(2),
            silent: true,
        });
        queue.push(SceneCommand::StopDisplay);

        assert_eq!(queue.len(), 3);

        let taken = queue.take();
        assert_eq!(taken[0], SceneCommand::Remove(InstanceId(1)));
        assert_eq!(taken[2], SceneCommand::StopDisplay);
        assert!(queue.is_empty());
    }

    #[test]
    fn commands_carry_arguments() {
        let mut args = SceneArgs::new();
        args.insert("level".to_string(), toml::Value::Integer(3));

        let mut queue = TransitionQueue::new();
        queue.push(SceneCommand::Spawn {
            class: ClassId(0).into(),
            args: args.clone(),
            silent: false,
        });

        let first = queue.iter().next();
        match first {
            Some(SceneCommand::Spawn { args: queued, .. }) => assert_eq!(queued, &args),
            other => panic!("Expected Spawn, got {:?}", other),
        }
    }
}
