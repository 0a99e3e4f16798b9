use std::{backtrace::Backtrace, sync::Arc, fmt::{Display, Debug}};
use num_enum::{IntoPrimitive, TryFromPrimitive};

pub type Result<T> = ::core::result::Result<T, Error>;

#[derive(Clone)]
#[non_exhaustive]
pub struct Error {
    pub ty: ErrorType,
    pub desc: Option<String>,
    #[cfg(debug_assertions)]
    pub backtrace: Arc<Backtrace>
}

impl Error {
    #[inline(always)]
    pub fn new (ty: ErrorType, desc: impl ToString) -> Self {
        let mut this = Self::from_type(ty);
        this.desc = Some(desc.to_string());
        this
    }

    #[inline(always)]
    pub fn from_type (ty: ErrorType) -> Self {
        Self {
            ty,
            desc: None,
            #[cfg(debug_assertions)]
            backtrace: Arc::new(Backtrace::capture())
        }
    }

    /// Numeric code of the error, compatible with OpenCL's where one exists.
    #[inline(always)]
    pub fn code (&self) -> i32 {
        self.ty.into()
    }
}

impl From<ErrorType> for Error {
    #[inline(always)]
    fn from(ty: ErrorType) -> Self {
        Self::from_type(ty)
    }
}

impl From<i32> for Error {
    #[inline]
    fn from(x: i32) -> Self {
        match ErrorType::try_from(x) {
            Ok(ty) => Self::from_type(ty),
            Err(_) => Self::new(ErrorType::InvalidValue, format!("unknown error code {x}"))
        }
    }
}

impl Debug for Error {
    #[inline(always)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} ({})", self.ty, self.code())?;

        if let Some(ref desc) = self.desc {
            write!(f, ": {desc}")?;
        }

        #[cfg(debug_assertions)]
        if let std::backtrace::BacktraceStatus::Captured = self.backtrace.status() {
            write!(f, "\n{}", self.backtrace)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

/// Error kinds. Codes mirror OpenCL's `CL_*` error codes, with ember-specific
/// failures placed below `-1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(i32)]
#[non_exhaustive]
pub enum ErrorType {
    OutOfResources = -5,
    ProfilingInfoNotAvailable = -7,
    InvalidValue = -30,
    InvalidDevice = -33,
    InvalidKernelArgs = -52,
    InvalidWorkGroupSize = -54,
    InvalidGlobalWorkSize = -63,

    /// A work item panicked while running a kernel
    WorkItemPanic = -1100,
    /// Work items of the same group reached a different number of barriers
    BarrierDivergence = -1101
}
