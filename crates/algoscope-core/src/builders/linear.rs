//! Stack and queue of string values with a bounded operation history.

use std::collections::VecDeque;

use crate::error::{Error, Result};

/// Number of operations kept in a history, newest first.
pub const HISTORY_LIMIT: usize = 10;

/// Kind of a recorded stack or queue operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum OperationKind {
    Push,
    Pop,
    Peek,
    Enqueue,
    Dequeue,
    Front,
    IsEmpty,
}

/// One entry of an operation history.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operation {
    pub kind: OperationKind,
    /// Argument of a push or enqueue.
    pub value: Option<String>,
    /// Returned value, or the message shown when the structure was empty.
    pub result: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct History(VecDeque<Operation>);

impl History {
    fn record(&mut self, kind: OperationKind, value: Option<String>, result: Option<String>) {
        self.0.push_front(Operation { kind, value, result });
        self.0.truncate(HISTORY_LIMIT);
    }

    fn entries(&self) -> impl Iterator<Item = &Operation> {
        self.0.iter()
    }
}

fn clean(value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        Err(Error::invalid("enter a value"))
    } else {
        Ok(value.to_string())
    }
}

/// Last-in, first-out stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueStack {
    items: Vec<String>,
    history: History,
}

impl ValueStack {
    const NAME: &'static str = "Stack";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: &str) -> Result<()> {
        let value = clean(value)?;
        self.items.push(value.clone());
        self.history.record(OperationKind::Push, Some(value), None);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<String> {
        let top = self.items.pop();
        self.finish(OperationKind::Pop, top)
    }

    pub fn peek(&mut self) -> Result<String> {
        let top = self.items.last().cloned();
        self.finish(OperationKind::Peek, top)
    }

    /// Answer "is the stack empty?" and record the question.
    pub fn check_empty(&mut self) -> bool {
        let empty = self.items.is_empty();
        self.history
            .record(OperationKind::IsEmpty, None, Some(empty.to_string()));
        empty
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.history = History::default();
    }

    /// Items from bottom to top.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn top(&self) -> Option<&str> {
        self.items.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn history(&self) -> Vec<Operation> {
        self.history.entries().cloned().collect()
    }

    fn finish(&mut self, kind: OperationKind, value: Option<String>) -> Result<String> {
        match value {
            Some(v) => {
                self.history.record(kind, None, Some(v.clone()));
                Ok(v)
            }
            None => {
                let err = Error::EmptyStructure(Self::NAME);
                self.history.record(kind, None, Some(err.to_string()));
                Err(err)
            }
        }
    }
}

/// First-in, first-out queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueQueue {
    items: VecDeque<String>,
    history: History,
}

impl ValueQueue {
    const NAME: &'static str = "Queue";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, value: &str) -> Result<()> {
        let value = clean(value)?;
        self.items.push_back(value.clone());
        self.history.record(OperationKind::Enqueue, Some(value), None);
        Ok(())
    }

    pub fn dequeue(&mut self) -> Result<String> {
        let front = self.items.pop_front();
        self.finish(OperationKind::Dequeue, front)
    }

    pub fn front(&mut self) -> Result<String> {
        let front = self.items.front().cloned();
        self.finish(OperationKind::Front, front)
    }

    /// Answer "is the queue empty?" and record the question.
    pub fn check_empty(&mut self) -> bool {
        let empty = self.items.is_empty();
        self.history
            .record(OperationKind::IsEmpty, None, Some(empty.to_string()));
        empty
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.history = History::default();
    }

    /// Items from front to rear.
    pub fn items(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn history(&self) -> Vec<Operation> {
        self.history.entries().cloned().collect()
    }

    fn finish(&mut self, kind: OperationKind, value: Option<String>) -> Result<String> {
        match value {
            Some(v) => {
                self.history.record(kind, None, Some(v.clone()));
                Ok(v)
            }
            None => {
                let err = Error::EmptyStructure(Self::NAME);
                self.history.record(kind, None, Some(err.to_string()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_is_lifo() {
        let mut stack = ValueStack::new();
        stack.push("x").unwrap();
        stack.push("y").unwrap();
        assert_eq!(stack.pop().unwrap(), "y");
        assert_eq!(stack.items(), &["x".to_string()]);
    }

    #[test]
    fn pop_from_empty_stack() {
        let mut stack = ValueStack::new();
        assert_eq!(stack.pop(), Err(Error::EmptyStructure("Stack")));
        let history = stack.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, OperationKind::Pop);
        assert_eq!(history[0].result.as_deref(), Some("Stack is empty"));
    }

    #[test]
    fn peek_does_not_remove() {
        let mut stack = ValueStack::new();
        stack.push("a").unwrap();
        assert_eq!(stack.peek().unwrap(), "a");
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn blank_values_are_rejected_without_history() {
        let mut stack = ValueStack::new();
        assert!(matches!(stack.push("   "), Err(Error::InvalidInput(_))));
        assert!(stack.is_empty());
        assert!(stack.history().is_empty());
    }

    #[test]
    fn queue_is_fifo() {
        let mut queue = ValueQueue::new();
        queue.enqueue("x").unwrap();
        queue.enqueue("y").unwrap();
        assert_eq!(queue.front().unwrap(), "x");
        assert_eq!(queue.dequeue().unwrap(), "x");
        assert_eq!(queue.items(), vec!["y".to_string()]);
        assert_eq!(queue.dequeue().unwrap(), "y");
        assert_eq!(queue.dequeue(), Err(Error::EmptyStructure("Queue")));
    }

    #[test]
    fn history_is_bounded_and_newest_first() {
        let mut queue = ValueQueue::new();
        for i in 0..15 {
            queue.enqueue(&i.to_string()).unwrap();
        }
        assert!(!queue.check_empty());
        let history = queue.history();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].kind, OperationKind::IsEmpty);
        assert_eq!(history[0].result.as_deref(), Some("false"));
        assert_eq!(history[1].value.as_deref(), Some("14"));
    }

    #[test]
    fn clear_resets_history() {
        let mut stack = ValueStack::new();
        stack.push("a").unwrap();
        stack.clear();
        assert!(stack.is_empty());
        assert!(stack.history().is_empty());
        assert!(stack.check_empty());
    }
}
