//! Reading objects from a stream, one object kind at a time

use pdf_object_reader::{
    read_object, ByteCursor, Name, Object, ObjectReader, ObjectRef, PDFObjectError, PDFObjectResult,
};
use rstest::rstest;

fn make_stream(s: &str) -> ByteCursor<std::io::Cursor<&[u8]>> {
    ByteCursor::from_bytes(s.as_bytes())
}

mod null {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test_log::test]
    fn test_type() -> PDFObjectResult<()> {
        let mut s = make_stream("null");
        assert_eq!(read_object(&mut s)?, Object::Null);
        Ok(())
    }

    #[test_log::test]
    fn test_length() -> PDFObjectResult<()> {
        let mut s = make_stream("null");
        ObjectReader::new().read_null(&mut s)?;
        assert_eq!(s.position(), 4);
        Ok(())
    }

    #[test_log::test]
    fn test_eof() {
        let mut s = make_stream("nul");
        let result = ObjectReader::new().read_null(&mut s);
        assert!(matches!(result, Err(PDFObjectError::EndOfInput { .. })));
    }

    #[rstest]
    #[case("NULL")]
    #[case("Null")]
    #[case("nill")]
    fn test_invalid_keyword(#[case] input: &str) {
        let result = ObjectReader::new().read_null(&mut make_stream(input));
        assert!(matches!(result, Err(PDFObjectError::UnexpectedKeyword { .. })));
    }
}

mod boolean {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case("true", true, 4)]
    #[case("false", false, 5)]
    fn test_value_and_length(#[case] input: &str, #[case] value: bool, #[case] length: u64) -> PDFObjectResult<()> {
        let mut s = make_stream(input);
        assert_eq!(read_object(&mut s)?, Object::Boolean(value));
        assert_eq!(s.position(), length);
        Ok(())
    }

    #[rstest]
    #[case("tru")]
    #[case("fal")]
    fn test_eof(#[case] input: &str) {
        let result = ObjectReader::new().read_boolean(&mut make_stream(input));
        assert!(matches!(result, Err(PDFObjectError::EndOfInput { .. })));
    }

    #[rstest]
    #[case("TRUE")]
    #[case("FALSE")]
    fn test_invalid_keyword(#[case] input: &str) {
        let result = ObjectReader::new().read_boolean(&mut make_stream(input));
        assert!(matches!(result, Err(PDFObjectError::UnexpectedKeyword { .. })));
    }
}

mod array {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn read_array(input: &str) -> PDFObjectResult<(Vec<Object>, u64)> {
        let mut s = make_stream(input);
        let array = ObjectReader::new().read_array(&mut s)?;
        Ok((array, s.position()))
    }

    #[test]
    fn test_empty() -> PDFObjectResult<()> {
        let (array, position) = read_array("[]")?;
        assert!(array.is_empty());
        assert_eq!(position, 2);
        Ok(())
    }

    #[test]
    fn test_length() -> PDFObjectResult<()> {
        let (_, position) = read_array("[true]")?;
        assert_eq!(position, 6);
        Ok(())
    }

    #[test]
    fn test_items() -> PDFObjectResult<()> {
        let (array, _) = read_array("[42 (spam) (eggs)]")?;
        assert_eq!(
            array,
            vec![
                Object::Integer(42),
                Object::String(b"spam".to_vec()),
                Object::String(b"eggs".to_vec()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_indexing() -> PDFObjectResult<()> {
        let (array, _) = read_array("[(first) (last)]")?;
        assert_eq!(array.first(), Some(&Object::String(b"first".to_vec())));
        assert_eq!(array.last(), Some(&Object::String(b"last".to_vec())));
        Ok(())
    }

    #[test]
    fn test_eof() {
        let result = read_array("[");
        assert!(matches!(result, Err(PDFObjectError::EndOfInput { .. })));
    }

    #[test]
    fn test_missing_opening_token() {
        let result = read_array("true]");
        assert!(matches!(result, Err(PDFObjectError::UnexpectedToken { offset: 0, .. })));
    }
}

mod reference {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn test_reference() -> PDFObjectResult<()> {
        let mut s = make_stream("12 0 R");
        assert_eq!(read_object(&mut s)?, Object::Reference(ObjectRef::new(12, 0)));
        assert_eq!(s.position(), 6);
        Ok(())
    }

    #[test]
    fn test_integer_pair_without_keyword() -> PDFObjectResult<()> {
        let mut s = make_stream("12 0");
        assert_eq!(read_object(&mut s)?, Object::Integer(12));
        assert_eq!(s.position(), 2);
        assert_eq!(read_object(&mut s)?, Object::Integer(0));
        Ok(())
    }
}

mod dictionary {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn test_duplicate_keys() -> PDFObjectResult<()> {
        let object = read_object(&mut make_stream("<< /A 1 /A 2 >>"))?;
        let dict = object.as_dict().unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("A"), Some(&Object::Integer(2)));
        Ok(())
    }

    #[test]
    fn test_page_dictionary() -> PDFObjectResult<()> {
        let mut s = make_stream(
            "<<\n  /Type /Page\n  /Parent 3 0 R\n  /MediaBox [0 0 612 792]\n  \
             /Resources << /Font << /F1 7 0 R >> >>\n  /Contents [4 0 R 5 0 R]\n>>\n",
        );
        let object = read_object(&mut s)?;
        let dict = object.as_dict().unwrap();

        assert_eq!(dict.get_name("Type"), Some(&Name::from("Page")));
        assert_eq!(dict.get_reference("Parent"), Some(ObjectRef::new(3, 0)));
        assert_eq!(
            dict.get("MediaBox").and_then(Object::as_array).map(<[Object]>::len),
            Some(4)
        );
        let fonts = dict
            .get("Resources")
            .and_then(Object::as_dict)
            .and_then(|r| r.get("Font"))
            .and_then(Object::as_dict)
            .unwrap();
        assert_eq!(fonts.get_reference("F1"), Some(ObjectRef::new(7, 0)));
        assert_eq!(s.peek()?, Some(b'\n'));
        Ok(())
    }
}

mod chaining {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn test_sequential_reads() -> PDFObjectResult<()> {
        let reader = ObjectReader::new();
        let mut s = make_stream("/Name 1 0 R 2 (str) <4142> [] % done\n");

        assert_eq!(reader.read(&mut s)?, Object::Name(Name::from("Name")));
        assert_eq!(reader.read(&mut s)?, Object::Reference(ObjectRef::new(1, 0)));
        assert_eq!(reader.read(&mut s)?, Object::Integer(2));
        assert_eq!(reader.read(&mut s)?, Object::String(b"str".to_vec()));
        assert_eq!(reader.read(&mut s)?, Object::String(b"AB".to_vec()));
        assert_eq!(reader.read(&mut s)?, Object::Array(vec![]));
        assert!(reader.read(&mut s).unwrap_err().is_end_of_input());
        Ok(())
    }

    #[test]
    fn test_failed_read_reports_offset() {
        let err = read_object(&mut make_stream("[1 2 {3}]")).unwrap_err();
        assert!(matches!(err, PDFObjectError::UnrecognizedObject { found: b'{', .. }));
        assert_eq!(err.offset(), Some(5));
    }
}
