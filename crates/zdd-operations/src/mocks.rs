use std::collections::HashSet;
use std::sync::Mutex;

use crate::error::ControlPlaneError;
use crate::traits::ControlPlane;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Rename { from: String, to: String },
    Deploy(Vec<String>),
    Delete(String),
    List,
}

impl Call {
    #[must_use]
    pub fn rename(from: &str, to: &str) -> Self {
        Self::Rename {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[must_use]
    pub fn deploy(args: &[&str]) -> Self {
        Self::Deploy(args.iter().map(ToString::to_string).collect())
    }

    #[must_use]
    pub fn delete(name: &str) -> Self {
        Self::Delete(name.to_string())
    }
}

pub struct MockControlPlane {
    instances: Vec<String>,
    calls: Mutex<Vec<Call>>,
    failing_renames: HashSet<String>,
    failing_deletes: HashSet<String>,
    fail_deploy: bool,
    fail_list: bool,
}

impl MockControlPlane {
    #[must_use]
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
            calls: Mutex::new(Vec::new()),
            failing_renames: HashSet::new(),
            failing_deletes: HashSet::new(),
            fail_deploy: false,
            fail_list: false,
        }
    }

    #[must_use]
    pub fn with_instances(mut self, names: &[&str]) -> Self {
        self.instances = names.iter().map(ToString::to_string).collect();
        self
    }

    /// Fail any rename whose source is `from`.
    #[must_use]
    pub fn fail_rename(mut self, from: &str) -> Self {
        self.failing_renames.insert(from.to_string());
        self
    }

    #[must_use]
    pub fn fail_delete(mut self, name: &str) -> Self {
        self.failing_deletes.insert(name.to_string());
        self
    }

    #[must_use]
    pub fn fail_deploy(mut self) -> Self {
        self.fail_deploy = true;
        self
    }

    #[must_use]
    pub fn fail_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("lock poisoned").push(call);
    }
}

impl Default for MockControlPlane {
    fn default() -> Self {
        Self::new()
    }
}

fn failure(command: String) -> ControlPlaneError {
    ControlPlaneError::CommandFailed {
        command,
        code: Some(1),
    }
}

impl ControlPlane for MockControlPlane {
    fn rename(&self, old_name: &str, new_name: &str) -> Result<(), ControlPlaneError> {
        self.record(Call::rename(old_name, new_name));
        if self.failing_renames.contains(old_name) {
            return Err(failure(format!("cf rename {old_name} {new_name}")));
        }
        Ok(())
    }

    fn deploy(&self, args: &[String]) -> Result<(), ControlPlaneError> {
        self.record(Call::Deploy(args.to_vec()));
        if self.fail_deploy {
            return Err(failure(format!("cf {}", args.join(" "))));
        }
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), ControlPlaneError> {
        self.record(Call::delete(name));
        if self.failing_deletes.contains(name) {
            return Err(failure(format!("cf delete {name} -f")));
        }
        Ok(())
    }

    fn list_names(&self) -> Result<Vec<String>, ControlPlaneError> {
        self.record(Call::List);
        if self.fail_list {
            return Err(failure("cf apps".to_string()));
        }
        Ok(self.instances.clone())
    }
}
