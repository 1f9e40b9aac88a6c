use std::fmt;

/// Direction of a completed index-finger flick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// A recognized, debounced gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
    ThumbsUp,
}

/// Command delivered to the controlled device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteCommand {
    Left,
    Right,
    Up,
    Down,
    Select,
}

/// Each channel has its own cooldown gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Swipe,
    ThumbsUp,
}

impl From<SwipeDirection> for GestureEvent {
    fn from(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => GestureEvent::SwipeLeft,
            SwipeDirection::Right => GestureEvent::SwipeRight,
            SwipeDirection::Up => GestureEvent::SwipeUp,
            SwipeDirection::Down => GestureEvent::SwipeDown,
        }
    }
}

impl GestureEvent {
    pub const ALL: [GestureEvent; 5] = [
        GestureEvent::SwipeLeft,
        GestureEvent::SwipeRight,
        GestureEvent::SwipeUp,
        GestureEvent::SwipeDown,
        GestureEvent::ThumbsUp,
    ];

    pub fn command(&self) -> RemoteCommand {
        match self {
            GestureEvent::SwipeLeft => RemoteCommand::Left,
            GestureEvent::SwipeRight => RemoteCommand::Right,
            GestureEvent::SwipeUp => RemoteCommand::Up,
            GestureEvent::SwipeDown => RemoteCommand::Down,
            GestureEvent::ThumbsUp => RemoteCommand::Select,
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            GestureEvent::ThumbsUp => Channel::ThumbsUp,
            _ => Channel::Swipe,
        }
    }

    /// Big on-screen label shown after the gesture fires
    pub fn label(&self) -> &'static str {
        match self {
            GestureEvent::SwipeLeft => "◀  LEFT",
            GestureEvent::SwipeRight => "RIGHT  ▶",
            GestureEvent::SwipeUp => "▲  UP",
            GestureEvent::SwipeDown => "DOWN  ▼",
            GestureEvent::ThumbsUp => "👍  OK",
        }
    }
}

impl RemoteCommand {
    /// Android `KEYCODE_DPAD_*` value sent through `input keyevent`
    pub fn keycode(&self) -> u16 {
        match self {
            RemoteCommand::Up => 19,
            RemoteCommand::Down => 20,
            RemoteCommand::Left => 21,
            RemoteCommand::Right => 22,
            RemoteCommand::Select => 23,
        }
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureEvent::SwipeLeft => write!(f, "swipe-left"),
            GestureEvent::SwipeRight => write!(f, "swipe-right"),
            GestureEvent::SwipeUp => write!(f, "swipe-up"),
            GestureEvent::SwipeDown => write!(f, "swipe-down"),
            GestureEvent::ThumbsUp => write!(f, "thumbs-up"),
        }
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteCommand::Left => write!(f, "LEFT"),
            RemoteCommand::Right => write!(f, "RIGHT"),
            RemoteCommand::Up => write!(f, "UP"),
            RemoteCommand::Down => write!(f, "DOWN"),
            RemoteCommand::Select => write!(f, "CENTER"),
        }
    }
}
