//! Delivery of remote commands to the controlled device
//!
//! - **Adb**: `adb shell input keyevent` against a TV or phone
//! - **Keyboard**: arrow keys / Return on this machine (feature `keyboard`)
//! - **Console**: print only, for dry runs and replays

use crate::config::{TransportConfig, TransportKind};
use crate::gesture::RemoteCommand;
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

/// Error type for command delivery
#[derive(Debug)]
pub enum TransportError {
    Spawn(String),
    Key(String),
    Unavailable(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Spawn(msg) => write!(f, "Spawn error: {}", msg),
            TransportError::Key(msg) => write!(f, "Key error: {}", msg),
            TransportError::Unavailable(msg) => write!(f, "Transport unavailable: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

pub trait Transport {
    /// Best-effort delivery; must not block the frame loop
    fn send(&mut self, command: RemoteCommand) -> Result<(), TransportError>;

    fn name(&self) -> &'static str;
}

/// Build the transport selected in config
pub fn from_config(config: &TransportConfig) -> Result<Box<dyn Transport>, TransportError> {
    match config.kind {
        TransportKind::Adb => {
            let adb = AdbTransport::new(&config.adb_path, config.adb_host.clone());
            adb.connect();
            Ok(Box::new(adb))
        }
        TransportKind::Console => Ok(Box::new(ConsoleTransport)),
        #[cfg(feature = "keyboard")]
        TransportKind::Keyboard => Ok(Box::new(KeyboardTransport::new()?)),
        #[cfg(not(feature = "keyboard"))]
        TransportKind::Keyboard => Err(TransportError::Unavailable(
            "keyboard transport not enabled. Build with --features keyboard".into(),
        )),
    }
}

// ============================================================================
// ADB
// ============================================================================

pub struct AdbTransport {
    adb_path: String,
    host: Option<String>,
    /// Fired-and-forgotten `adb` processes, reaped on later sends
    children: Vec<Child>,
}

impl AdbTransport {
    pub fn new(adb_path: &str, host: Option<String>) -> Self {
        Self {
            adb_path: adb_path.to_string(),
            host,
            children: Vec::new(),
        }
    }

    /// Arguments for one key event, without the adb executable
    pub fn keyevent_args(&self, command: RemoteCommand) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(host) = &self.host {
            args.push("-s".to_string());
            args.push(host.clone());
        }
        args.extend(["shell", "input", "keyevent"].map(String::from));
        args.push(command.keycode().to_string());
        args
    }

    /// `adb connect HOST` once at startup; failures are only logged
    pub fn connect(&self) {
        let Some(host) = &self.host else {
            info!("adb: no host configured, using the default device");
            return;
        };

        info!("connecting adb to {}", host);
        match Command::new(&self.adb_path).args(["connect", host]).output() {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                info!("adb: {}", stdout.trim());
                if !output.status.success() {
                    warn!(
                        "adb connect exited with {}: {}",
                        output.status,
                        String::from_utf8_lossy(&output.stderr).trim()
                    );
                }
            }
            Err(e) => warn!("could not run {}: {}", self.adb_path, e),
        }
    }

    fn reap(&mut self) {
        self.children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    warn!("adb keyevent exited with {}", status);
                }
                false
            }
            Ok(None) => true,
            Err(e) => {
                debug!("adb child wait failed: {}", e);
                false
            }
        });
    }
}

impl Transport for AdbTransport {
    fn send(&mut self, command: RemoteCommand) -> Result<(), TransportError> {
        self.reap();

        let child = Command::new(&self.adb_path)
            .args(self.keyevent_args(command))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| TransportError::Spawn(format!("{}: {}", self.adb_path, e)))?;
        self.children.push(child);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "adb"
    }
}

impl Drop for AdbTransport {
    fn drop(&mut self) {
        for child in &mut self.children {
            let _ = child.wait();
        }
    }
}

// ============================================================================
// Console
// ============================================================================

pub struct ConsoleTransport;

impl Transport for ConsoleTransport {
    fn send(&mut self, command: RemoteCommand) -> Result<(), TransportError> {
        info!("[dry-run] {} (keycode {})", command, command.keycode());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

// ============================================================================
// Keyboard
// ============================================================================

#[cfg(feature = "keyboard")]
pub struct KeyboardTransport {
    enigo: enigo::Enigo,
}

#[cfg(feature = "keyboard")]
impl KeyboardTransport {
    pub fn new() -> Result<Self, TransportError> {
        let enigo = enigo::Enigo::new(&enigo::Settings::default()).map_err(|e| {
            TransportError::Unavailable(format!("Failed to initialize Enigo: {}", e))
        })?;
        Ok(Self { enigo })
    }
}

#[cfg(feature = "keyboard")]
impl Transport for KeyboardTransport {
    fn send(&mut self, command: RemoteCommand) -> Result<(), TransportError> {
        use enigo::{Direction, Key, Keyboard};

        let key = match command {
            RemoteCommand::Left => Key::LeftArrow,
            RemoteCommand::Right => Key::RightArrow,
            RemoteCommand::Up => Key::UpArrow,
            RemoteCommand::Down => Key::DownArrow,
            RemoteCommand::Select => Key::Return,
        };
        self.enigo
            .key(key, Direction::Click)
            .map_err(|e| TransportError::Key(format!("Failed to send key: {}", e)))
    }

    fn name(&self) -> &'static str {
        "keyboard"
    }
}
