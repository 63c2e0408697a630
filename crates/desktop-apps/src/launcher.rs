//! Starts intents as child processes.

use app_registry::{ActivityStarter, Intent};
use log::{debug, info, warn};
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, PoisonError};

/// Placeholder substituted in the uninstall command template.
pub const PACKAGE_PLACEHOLDER: &str = "{package}";

/// Runs launch commands in the background and uninstall commands to completion.
///
/// Launched children are kept until they exit and are reaped on the next
/// start or [`ProcessStarter::reap`] call.
#[derive(Debug, Default)]
pub struct ProcessStarter {
    uninstall_command: Option<Vec<String>>,
    children: Mutex<Vec<(String, Child)>>,
}

impl ProcessStarter {
    pub fn new(uninstall_command: Option<Vec<String>>) -> Self {
        Self {
            uninstall_command,
            children: Mutex::new(Vec::new()),
        }
    }

    /// Collect exited children. Returns how many are still running.
    pub fn reap(&self) -> usize {
        let mut children = self.children.lock().unwrap_or_else(PoisonError::into_inner);
        children.retain_mut(|(package, child)| match child.try_wait() {
            Ok(Some(status)) => {
                debug!("{} (pid {}) exited with {}", package, child.id(), status);
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!("Can't wait on {} (pid {}): {}", package, child.id(), e);
                false
            }
        });
        children.len()
    }

    /// Uninstall command with the package substituted in.
    pub fn uninstall_command_for(&self, package: &str) -> Option<Vec<String>> {
        let template = self.uninstall_command.as_ref()?;
        if template.is_empty() {
            return None;
        }

        Some(
            template
                .iter()
                .map(|arg| arg.replace(PACKAGE_PLACEHOLDER, package))
                .collect(),
        )
    }
}

impl ActivityStarter for ProcessStarter {
    fn start_activity(&self, intent: &Intent) -> Result<(), String> {
        self.reap();

        match intent {
            Intent::Launch { package, command } => {
                let (program, args) = command
                    .split_first()
                    .ok_or_else(|| format!("empty launch command for {}", package))?;
                debug!("Spawning {} {:?}", program, args);

                let child = Command::new(program)
                    .args(args)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
                    .map_err(|e| format!("{}: {}", program, e))?;

                info!("Started {} (pid {})", package, child.id());
                self.children
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push((package.clone(), child));
                Ok(())
            }
            Intent::Delete { package } => {
                let command = self
                    .uninstall_command_for(package)
                    .ok_or_else(|| "no uninstall command configured".to_string())?;
                info!("Uninstalling {} via {:?}", package, command);

                let status = Command::new(&command[0])
                    .args(&command[1..])
                    .status()
                    .map_err(|e| format!("{}: {}", command[0], e))?;

                if status.success() {
                    Ok(())
                } else {
                    Err(format!("{} exited with {}", command[0], status))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delete(package: &str) -> Intent {
        Intent::Delete {
            package: package.to_string(),
        }
    }

    #[test]
    fn test_uninstall_template_substitution() {
        let starter = ProcessStarter::new(Some(vec![
            "flatpak".to_string(),
            "uninstall".to_string(),
            "--app={package}".to_string(),
        ]));

        assert_eq!(
            starter.uninstall_command_for("org.example.App").unwrap(),
            vec!["flatpak", "uninstall", "--app=org.example.App"]
        );
    }

    #[test]
    fn test_uninstall_without_template_fails() {
        let starter = ProcessStarter::default();
        assert!(starter.start_activity(&delete("a")).is_err());

        let empty = ProcessStarter::new(Some(Vec::new()));
        assert!(empty.uninstall_command_for("a").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_uninstall_reports_exit_status() {
        let ok = ProcessStarter::new(Some(vec!["true".to_string()]));
        assert!(ok.start_activity(&delete("a")).is_ok());

        let failing = ProcessStarter::new(Some(vec!["false".to_string()]));
        assert!(failing.start_activity(&delete("a")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_launched_children_are_reaped() {
        let starter = ProcessStarter::default();
        let intent = Intent::Launch {
            package: "quick".to_string(),
            command: vec!["true".to_string()],
        };

        starter.start_activity(&intent).unwrap();
        starter.start_activity(&intent).unwrap();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while starter.reap() > 0 {
            assert!(std::time::Instant::now() < deadline, "children never exited");
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert_eq!(starter.reap(), 0);
    }

    #[test]
    fn test_launch_missing_program() {
        let starter = ProcessStarter::default();
        let intent = Intent::Launch {
            package: "ghost".to_string(),
            command: vec!["/nonexistent/ghost-binary".to_string()],
        };

        let err = starter.start_activity(&intent).unwrap_err();
        assert!(err.contains("/nonexistent/ghost-binary"));

        let empty = Intent::Launch {
            package: "ghost".to_string(),
            command: Vec::new(),
        };
        assert!(starter.start_activity(&empty).is_err());
    }
}
