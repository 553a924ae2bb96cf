#[cfg(test)]
mod tests {
    use rowbind::{
        CoercionCause, ColumnMap, Error, FieldKind, Nullable, Outcome, Record, Value, build_insert,
        scan, scan_report,
    };
    use uuid::Uuid;

    /// Not a column type, fields of this type can only be left unannotated.
    #[derive(Default, Debug, PartialEq)]
    struct Cache(Vec<u8>);

    #[derive(Record, Default, Debug)]
    struct SensorReading {
        #[rowbind(name = "id")]
        id: i32,
        #[rowbind(name = "sensor_id")]
        sensor: Uuid,
        #[rowbind(name = "level")]
        level: Option<f32>,
        #[rowbind(name = "offset")]
        offset: Nullable<Option<i16>>,
        #[rowbind(name = "scale")]
        scale: Nullable<f64>,
        #[rowbind(name = "")]
        #[allow(dead_code)]
        label: String,
        #[allow(dead_code)]
        cache: Cache,
        #[rowbind(name = "payload")]
        payload: Vec<u8>,
        #[rowbind(name = "raw")]
        raw: Value,
    }

    #[derive(Record, Default)]
    #[table_name("codes")]
    struct Duplicated {
        #[rowbind(name = "code")]
        first: String,
        #[rowbind(name = "code")]
        second: String,
    }

    #[derive(Record, Default)]
    struct Empty {
        note: String,
    }

    #[test]
    fn derived_descriptors() {
        assert_eq!(SensorReading::table_name(), "sensor_reading");
        let fields = SensorReading::fields();
        let names: Vec<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            ["id", "sensor_id", "level", "offset", "scale", "payload", "raw"]
        );
        let positions: Vec<_> = fields.iter().map(|f| f.position).collect();
        assert_eq!(positions, [0, 1, 2, 3, 4, 7, 8]);
        assert_eq!(fields[1].field, "sensor");
        assert_eq!(fields[2].kind, FieldKind::Optional(FieldKind::Float(32).into()));
        assert_eq!(
            fields[3].kind,
            FieldKind::Nullable(FieldKind::Optional(FieldKind::SignedInt(16).into()).into())
        );
        assert_eq!(fields[5].kind, FieldKind::Bytes);

        let reading = SensorReading::default();
        assert!(reading.field(5).is_none());
        assert!(reading.field(6).is_none());
        assert!(reading.field(7).is_some());
        assert!(reading.field(42).is_none());
    }

    #[test]
    fn duplicate_column_last_wins() {
        assert_eq!(Duplicated::table_name(), "codes");
        let map = ColumnMap::resolve::<Duplicated>();
        assert_eq!(map.get("code"), Some(1));
        let mut value = Duplicated::default();
        scan(&["code"], &[Value::Varchar("B7".into())], &mut value).unwrap();
        assert_eq!(value.first, "");
        assert_eq!(value.second, "B7");
    }

    #[test]
    fn empty_record() {
        assert_eq!(Empty::table_name(), "empty");
        assert!(Empty::fields().is_empty());
        assert!(ColumnMap::resolve::<Empty>().is_empty());
        let mut value = Empty::default();
        let report = scan_report(&["note"], &[Value::Varchar("x".into())], &mut value).unwrap();
        assert_eq!(report.unmapped(), 1);
        assert_eq!(value.note, "");
        assert!(build_insert(&value).is_empty());
    }

    #[test]
    fn scan_nullable_and_optional() {
        let sensor = Uuid::from_u128(0x8d3c_11e0_4b2a_4c4e_9f1d_0a7b_1c2d_3e4f);
        let mut reading = SensorReading::default();
        scan(
            &["id", "sensor_id", "level", "offset", "scale", "payload", "raw"],
            &[
                Value::Int64(3),
                Value::Uuid(sensor),
                Value::Null,
                Value::Null,
                Value::Varchar("2.5".into()),
                Value::Blob([0xCA, 0xFE].as_slice().into()),
                Value::UInt16(9),
            ],
            &mut reading,
        )
        .unwrap();
        assert_eq!(reading.id, 3);
        assert_eq!(reading.sensor, sensor);
        assert_eq!(reading.level, None);
        assert!(!reading.offset.is_valid());
        assert_eq!(reading.scale, Nullable::Valid(2.5));
        assert_eq!(reading.payload, [0xCA, 0xFE]);
        assert_eq!(reading.raw, Value::UInt16(9));

        scan(&["offset"], &[Value::Varchar("-4".into())], &mut reading).unwrap();
        assert_eq!(reading.offset, Nullable::Valid(Some(-4)));

        let result = scan(&["scale"], &[Value::Null], &mut reading);
        assert!(matches!(
            result,
            Err(Error::NullToNonNullable { ref column, kind: FieldKind::Float(64) }) if column == "scale"
        ));
        assert_eq!(reading.scale, Nullable::Valid(2.5));
    }

    #[test]
    fn scan_stops_at_first_error() {
        let mut reading = SensorReading::default();
        let result = scan(
            &["id", "level", "offset"],
            &[
                Value::Int64(5),
                Value::Varchar("not a number".into()),
                Value::Int64(1),
            ],
            &mut reading,
        );
        let Err(Error::Coercion { column, source }) = result else {
            panic!("Expected a coercion error");
        };
        assert_eq!(column, "level");
        assert_eq!(source.raw_type, "Varchar");
        assert_eq!(source.cause, CoercionCause::Syntax);
        assert_eq!(reading.id, 5);
        assert!(!reading.offset.is_valid());
    }

    #[test]
    fn skipped_opaque() {
        let mut reading = SensorReading::default();
        let report = scan_report(
            &["sensor_id", "payload"],
            &[Value::Varchar("8d3c11e0".into()), Value::Null],
            &mut reading,
        )
        .unwrap();
        assert_eq!(report.outcome("sensor_id"), Some(Outcome::Skipped));
        assert_eq!(report.outcome("payload"), Some(Outcome::Skipped));
        assert_eq!(reading.sensor, Uuid::nil());
    }

    #[test]
    fn insert_skips_identity() {
        let reading = SensorReading {
            id: 11,
            level: Some(0.25),
            ..Default::default()
        };
        let parts = build_insert(&reading);
        assert_eq!(
            parts.columns,
            ["sensor_id", "level", "offset", "scale", "payload", "raw"]
        );
        assert_eq!(parts.values[0], Value::Uuid(Uuid::nil()));
        assert_eq!(parts.values[1], Value::Float32(0.25));
        assert_eq!(parts.values[2], Value::Null);
        assert_eq!(parts.values[4], Value::Blob(Box::default()));
    }
}
