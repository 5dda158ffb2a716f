use dns_blocker_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

/// Conversions between the domain `RecordType` and hickory's.
///
/// Both sides carry the numeric type code, so unknown types survive the
/// round trip instead of collapsing into a default.
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }
}
