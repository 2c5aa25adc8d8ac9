/// Kind of a monitored/configured entity known to the object identity
/// cache. The numeric code is the `objecttype_id` column value and is
/// part of the cache ordering, so codes are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum ObjectKind {
    Host = 1,
    Service = 2,
    HostGroup = 3,
    ServiceGroup = 4,
    HostEscalation = 5,
    ServiceEscalation = 6,
    HostDependency = 7,
    ServiceDependency = 8,
    TimePeriod = 9,
    Contact = 10,
    ContactGroup = 11,
    Command = 12,
}

impl ObjectKind {
    /// The stable `objecttype_id` code stored in the objects table.
    pub fn code(self) -> i8 {
        self as i8
    }

    /// Reverse of [`ObjectKind::code`], for rows read back from storage.
    pub fn from_code(code: i8) -> Option<ObjectKind> {
        Some(match code {
            1 => ObjectKind::Host,
            2 => ObjectKind::Service,
            3 => ObjectKind::HostGroup,
            4 => ObjectKind::ServiceGroup,
            5 => ObjectKind::HostEscalation,
            6 => ObjectKind::ServiceEscalation,
            7 => ObjectKind::HostDependency,
            8 => ObjectKind::ServiceDependency,
            9 => ObjectKind::TimePeriod,
            10 => ObjectKind::Contact,
            11 => ObjectKind::ContactGroup,
            12 => ObjectKind::Command,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trip() {
        for kind in [
            ObjectKind::Host,
            ObjectKind::Service,
            ObjectKind::HostGroup,
            ObjectKind::ServiceGroup,
            ObjectKind::HostEscalation,
            ObjectKind::ServiceEscalation,
            ObjectKind::HostDependency,
            ObjectKind::ServiceDependency,
            ObjectKind::TimePeriod,
            ObjectKind::Contact,
            ObjectKind::ContactGroup,
            ObjectKind::Command,
        ] {
            assert_eq!(ObjectKind::from_code(kind.code()), Some(kind));
        }

        assert_eq!(ObjectKind::from_code(0), None);
        assert_eq!(ObjectKind::from_code(13), None);
    }
}
