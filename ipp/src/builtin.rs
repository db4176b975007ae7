//!
//! Built-in IANA tag and enum tables
//!
use crate::registry::{AttributeEnumRecord, EnumRecord, MetadataSource, TagRecord};

const TAGS: &[(&str, &str, &str)] = &[
    ("0x00", "reserved", "reserved for definition in a future IETF standards track document"),
    ("0x01", "operation-attributes-tag", "operation attributes group"),
    ("0x02", "job-attributes-tag", "job attributes group"),
    ("0x03", "end-of-attributes-tag", "end of attributes"),
    ("0x04", "printer-attributes-tag", "printer attributes group"),
    ("0x05", "unsupported-attributes-tag", "unsupported attributes group"),
    ("0x06", "subscription-attributes-tag", "subscription attributes group"),
    ("0x07", "event-notification-attributes-tag", "event notification attributes group"),
    ("0x10", "unsupported", "out-of-band value: unsupported"),
    ("0x12", "unknown", "out-of-band value: unknown"),
    ("0x13", "no-value", "out-of-band value: no-value"),
    ("0x21", "integer", "integer"),
    ("0x22", "boolean", "boolean"),
    ("0x23", "enum", "enum"),
    ("0x30", "octetString", "octetString with an unspecified format"),
    ("0x31", "dateTime", "dateTime"),
    ("0x32", "resolution", "resolution"),
    ("0x33", "rangeOfInteger", "rangeOfInteger"),
    ("0x34", "begCollection", "begin of a collection"),
    ("0x35", "textWithLanguage", "textWithLanguage"),
    ("0x36", "nameWithLanguage", "nameWithLanguage"),
    ("0x37", "endCollection", "end of a collection"),
    ("0x41", "textWithoutLanguage", "textWithoutLanguage"),
    ("0x42", "nameWithoutLanguage", "nameWithoutLanguage"),
    ("0x44", "keyword", "keyword"),
    ("0x45", "uri", "uri"),
    ("0x46", "uriScheme", "uriScheme"),
    ("0x47", "charset", "charset"),
    ("0x48", "naturalLanguage", "naturalLanguage"),
    ("0x49", "mimeMediaType", "mimeMediaType"),
    ("0x4a", "memberAttrName", "memberAttrName"),
];

const STATUS_CODES: &[(&str, &str)] = &[
    ("0x0000", "successful-ok"),
    ("0x0001", "successful-ok-ignored-or-substituted-attributes"),
    ("0x0002", "successful-ok-conflicting-attributes"),
    ("0x0003", "successful-ok-ignored-subscriptions"),
    ("0x0005", "successful-ok-too-many-events"),
    ("0x0400", "client-error-bad-request"),
    ("0x0401", "client-error-forbidden"),
    ("0x0402", "client-error-not-authenticated"),
    ("0x0403", "client-error-not-authorized"),
    ("0x0404", "client-error-not-possible"),
    ("0x0405", "client-error-timeout"),
    ("0x0406", "client-error-not-found"),
    ("0x0407", "client-error-gone"),
    ("0x0408", "client-error-request-entity-too-large"),
    ("0x0409", "client-error-request-value-too-long"),
    ("0x040A", "client-error-document-format-not-supported"),
    ("0x040B", "client-error-attributes-or-values-not-supported"),
    ("0x040C", "client-error-uri-scheme-not-supported"),
    ("0x040D", "client-error-charset-not-supported"),
    ("0x040E", "client-error-conflicting-attributes"),
    ("0x040F", "client-error-compression-not-supported"),
    ("0x0410", "client-error-compression-error"),
    ("0x0411", "client-error-document-format-error"),
    ("0x0412", "client-error-document-access-error"),
    ("0x0500", "server-error-internal-error"),
    ("0x0501", "server-error-operation-not-supported"),
    ("0x0502", "server-error-service-unavailable"),
    ("0x0503", "server-error-version-not-supported"),
    ("0x0504", "server-error-device-error"),
    ("0x0505", "server-error-temporary-error"),
    ("0x0506", "server-error-not-accepting-jobs"),
    ("0x0507", "server-error-busy"),
    ("0x0508", "server-error-job-canceled"),
    ("0x0509", "server-error-multiple-document-jobs-not-supported"),
];

const OPERATIONS: &[(&str, &str)] = &[
    ("0x0002", "Print-Job"),
    ("0x0003", "Print-URI"),
    ("0x0004", "Validate-Job"),
    ("0x0005", "Create-Job"),
    ("0x0006", "Send-Document"),
    ("0x0007", "Send-URI"),
    ("0x0008", "Cancel-Job"),
    ("0x0009", "Get-Job-Attributes"),
    ("0x000A", "Get-Jobs"),
    ("0x000B", "Get-Printer-Attributes"),
    ("0x000C", "Hold-Job"),
    ("0x000D", "Release-Job"),
    ("0x000E", "Restart-Job"),
    ("0x0010", "Pause-Printer"),
    ("0x0011", "Resume-Printer"),
    ("0x0012", "Purge-Jobs"),
    ("0x0013", "Set-Printer-Attributes"),
    ("0x0014", "Set-Job-Attributes"),
    ("0x0016", "Create-Printer-Subscription"),
    ("0x0017", "Create-Job-Subscription"),
    ("0x0018", "Get-Subscription-Attributes"),
    ("0x0019", "Get-Subscriptions"),
    ("0x001A", "Renew-Subscription"),
    ("0x001B", "Cancel-Subscription"),
    ("0x001C", "Get-Notifications"),
    ("0x0022", "Enable-Printer"),
    ("0x0023", "Disable-Printer"),
    ("0x0025", "Hold-New-Jobs"),
    ("0x0026", "Release-Held-New-Jobs"),
    ("0x0038", "Cancel-Jobs"),
    ("0x0039", "Cancel-My-Jobs"),
    ("0x003B", "Close-Job"),
    ("0x4001", "CUPS-Get-Default"),
    ("0x4002", "CUPS-Get-Printers"),
    ("0x4003", "CUPS-Add-Modify-Printer"),
    ("0x4004", "CUPS-Delete-Printer"),
    ("0x4005", "CUPS-Get-Classes"),
    ("0x4006", "CUPS-Add-Modify-Class"),
    ("0x4007", "CUPS-Delete-Class"),
    ("0x4008", "CUPS-Accept-Jobs"),
    ("0x4009", "CUPS-Reject-Jobs"),
    ("0x400A", "CUPS-Set-Default"),
    ("0x400B", "CUPS-Get-Devices"),
    ("0x400C", "CUPS-Get-PPDs"),
    ("0x400D", "CUPS-Move-Job"),
    ("0x400E", "CUPS-Authenticate-Job"),
    ("0x400F", "CUPS-Get-PPD"),
    ("0x4027", "CUPS-Get-Document"),
    ("0x4028", "CUPS-Create-Local-Printer"),
];

const PRINTER_STATES: &[(&str, &str)] = &[("3", "idle"), ("4", "processing"), ("5", "stopped")];

const JOB_STATES: &[(&str, &str)] = &[
    ("3", "pending"),
    ("4", "pending-held"),
    ("5", "processing"),
    ("6", "processing-stopped"),
    ("7", "canceled"),
    ("8", "aborted"),
    ("9", "completed"),
];

const ORIENTATIONS: &[(&str, &str)] = &[
    ("3", "portrait"),
    ("4", "landscape"),
    ("5", "reverse-landscape"),
    ("6", "reverse-portrait"),
    ("7", "none"),
];

const PRINT_QUALITIES: &[(&str, &str)] = &[("3", "draft"), ("4", "normal"), ("5", "high")];

const FINISHINGS: &[(&str, &str)] = &[
    ("3", "none"),
    ("4", "staple"),
    ("5", "punch"),
    ("6", "cover"),
    ("7", "bind"),
    ("8", "saddle-stitch"),
    ("9", "edge-stitch"),
    ("10", "fold"),
    ("11", "trim"),
    ("12", "bale"),
    ("13", "booklet-maker"),
    ("14", "jog-offset"),
    ("20", "staple-top-left"),
    ("21", "staple-bottom-left"),
    ("22", "staple-top-right"),
    ("23", "staple-bottom-right"),
    ("24", "edge-stitch-left"),
    ("25", "edge-stitch-top"),
    ("26", "edge-stitch-right"),
    ("27", "edge-stitch-bottom"),
    ("28", "staple-dual-left"),
    ("29", "staple-dual-top"),
    ("30", "staple-dual-right"),
    ("31", "staple-dual-bottom"),
    ("50", "bind-left"),
    ("51", "bind-top"),
    ("52", "bind-right"),
    ("53", "bind-bottom"),
    ("70", "punch-top-left"),
    ("71", "punch-bottom-left"),
    ("72", "punch-top-right"),
    ("73", "punch-bottom-right"),
    ("74", "punch-dual-left"),
    ("75", "punch-dual-top"),
    ("76", "punch-dual-right"),
    ("77", "punch-dual-bottom"),
];

fn enum_record(name: &str, values: &[(&str, &str)]) -> AttributeEnumRecord {
    AttributeEnumRecord {
        name: name.to_owned(),
        enums: values.iter().map(|(value, label)| EnumRecord::new(value, label)).collect(),
    }
}

/// Metadata source with the IANA registrations the codec knows out of the box
pub fn source() -> MetadataSource {
    let tags = TAGS
        .iter()
        .map(|(value, name, description)| TagRecord {
            description: Some((*description).to_owned()),
            ..TagRecord::new(value, name)
        })
        .collect();

    let attributes = vec![
        enum_record("status-code", STATUS_CODES),
        enum_record("operations-supported", OPERATIONS),
        enum_record("printer-state", PRINTER_STATES),
        enum_record("job-state", JOB_STATES),
        enum_record("orientation-requested", ORIENTATIONS),
        enum_record("orientation-requested-default", ORIENTATIONS),
        enum_record("orientation-requested-supported", ORIENTATIONS),
        enum_record("print-quality", PRINT_QUALITIES),
        enum_record("print-quality-default", PRINT_QUALITIES),
        enum_record("print-quality-supported", PRINT_QUALITIES),
        enum_record("finishings", FINISHINGS),
        enum_record("finishings-default", FINISHINGS),
        enum_record("finishings-supported", FINISHINGS),
    ];

    MetadataSource { tags, attributes }
}

#[cfg(test)]
mod tests {
    use crate::registry::Metadata;

    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let metadata = Metadata::builtin().unwrap();
        assert_eq!(metadata.tags().len(), TAGS.len());
        assert_eq!(
            metadata.enums().entries("status-code").map(|e| e.len()),
            Some(STATUS_CODES.len())
        );
    }

    #[test]
    fn test_builtin_names() {
        let metadata = Metadata::builtin().unwrap();
        assert_eq!(metadata.tags().name_of(0x01), "operation-attributes-tag");
        assert_eq!(metadata.tags().name_of(0x21), "integer");
        assert_eq!(metadata.enums().resolve("status-code", 0x0403), Some("client-error-not-authorized"));
        assert_eq!(metadata.enums().resolve("operations-supported", 11), Some("Get-Printer-Attributes"));
        assert_eq!(metadata.enums().resolve("orientation-requested", 3), Some("portrait"));
    }
}
