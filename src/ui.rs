//! User interface abstraction for the interactive menu
//!
//! Production code prompts through dialoguer; tests script the answers with
//! [`MockUI`].

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use std::cell::RefCell;
use std::collections::VecDeque;

pub trait UserInterface {
    /// Display a selection menu and return the selected index
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Text input that may be left empty
    fn input(&self, prompt: &str) -> Result<String>;

    /// Text input pre-filled with `default`
    fn input_with_default(&self, prompt: &str, default: &str) -> Result<String>;

    fn confirm_with_default(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Production implementation using dialoguer
pub struct DialoguerUI;

impl UserInterface for DialoguerUI {
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        let selection = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()?;
        selection.ok_or_else(|| anyhow::anyhow!("User cancelled selection"))
    }

    fn input(&self, prompt: &str) -> Result<String> {
        let input = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(input)
    }

    fn input_with_default(&self, prompt: &str, default: &str) -> Result<String> {
        let input = Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?;
        Ok(input)
    }

    fn confirm_with_default(&self, prompt: &str, default: bool) -> Result<bool> {
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?;
        confirmed.ok_or_else(|| anyhow::anyhow!("User cancelled confirmation"))
    }
}

/// Scripted implementation for tests
///
/// Answers are consumed in order; running out of answers is an error, which
/// ends the menu loop.
#[derive(Default)]
pub struct MockUI {
    selections: RefCell<VecDeque<usize>>,
    inputs: RefCell<VecDeque<String>>,
    confirms: RefCell<VecDeque<bool>>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(self, index: usize) -> Self {
        self.selections.borrow_mut().push_back(index);
        self
    }

    pub fn with_input(self, value: impl Into<String>) -> Self {
        self.inputs.borrow_mut().push_back(value.into());
        self
    }

    pub fn with_confirm(self, value: bool) -> Self {
        self.confirms.borrow_mut().push_back(value);
        self
    }

    /// Whether every scripted answer was used
    pub fn is_exhausted(&self) -> bool {
        self.selections.borrow().is_empty()
            && self.inputs.borrow().is_empty()
            && self.confirms.borrow().is_empty()
    }
}

impl UserInterface for MockUI {
    fn select(&self, _prompt: &str, items: &[String]) -> Result<usize> {
        let index = self
            .selections
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No more selections configured"))?;
        if index >= items.len() {
            anyhow::bail!("Selection {} out of range", index);
        }
        Ok(index)
    }

    fn input(&self, _prompt: &str) -> Result<String> {
        self.inputs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No more inputs configured"))
    }

    fn input_with_default(&self, _prompt: &str, default: &str) -> Result<String> {
        let value = self
            .inputs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No more inputs configured"))?;
        // An empty scripted answer behaves like pressing Enter
        Ok(if value.is_empty() {
            default.to_string()
        } else {
            value
        })
    }

    fn confirm_with_default(&self, _prompt: &str, _default: bool) -> Result<bool> {
        self.confirms
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No more confirmations configured"))
    }
}
