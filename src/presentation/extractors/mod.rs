pub mod validated_json;
