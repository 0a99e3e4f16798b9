use ember_rs::prelude::*;

#[test]
fn codes () {
    let err = Error::from(-54);
    assert_eq!(err.ty, ErrorType::InvalidWorkGroupSize);
    assert_eq!(err.code(), -54);
    assert!(err.desc.is_none());

    assert_eq!(i32::from(ErrorType::OutOfResources), -5);
    assert_eq!(ErrorType::try_from(-1101).ok(), Some(ErrorType::BarrierDivergence));
    assert_eq!(ErrorType::try_from(-1100).ok(), Some(ErrorType::WorkItemPanic));
}

#[test]
fn unknown_code () {
    let err = Error::from(12345);
    assert_eq!(err.ty, ErrorType::InvalidValue);
    assert!(err.desc.unwrap().contains("12345"));
}

#[test]
fn display () {
    let err = Error::new(ErrorType::InvalidGlobalWorkSize, "empty launch");
    assert!(err.to_string().starts_with("InvalidGlobalWorkSize (-63): empty launch"));

    let err = Error::from(ErrorType::ProfilingInfoNotAvailable);
    assert!(err.to_string().starts_with("ProfilingInfoNotAvailable (-7)"));
}
