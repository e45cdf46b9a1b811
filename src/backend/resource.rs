use crate::backend::error::BackendError;
use crate::backend::error::BackendError::UnknownResource;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// What the admin panel may reach on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Slots,
    Schedule,
    Attendance,
    Approval,
    Appointments,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Slots => "slots",
            Resource::Schedule => "schedule",
            Resource::Attendance => "attendance",
            Resource::Approval => "approval",
            Resource::Appointments => "appointments",
        }
    }
}

impl FromStr for Resource {
    type Err = BackendError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "users" => Ok(Resource::Users),
            "slots" => Ok(Resource::Slots),
            "schedule" => Ok(Resource::Schedule),
            "attendance" => Ok(Resource::Attendance),
            "approval" => Ok(Resource::Approval),
            "appointments" => Ok(Resource::Appointments),
            _ => Err(UnknownResource(value.to_owned())),
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
