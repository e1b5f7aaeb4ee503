use std::fmt;

/// Result of ticking one node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
    /// The node needs more ticks; the next tick resumes it.
    Running,
}

impl Status {
    #[inline]
    pub fn is_running(self) -> bool {
        self == Status::Running
    }

    /// `true` for `Success` and `Failure`.
    #[inline]
    pub fn is_done(self) -> bool {
        self != Status::Running
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failure => "failure",
            Status::Running => "running",
        }
    }

    /// Swap `Success` and `Failure`; `Running` is unchanged.
    #[inline]
    pub fn invert(self) -> Status {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }
}

impl From<bool> for Status {
    fn from(ok: bool) -> Self {
        if ok { Status::Success } else { Status::Failure }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
