mod docgen_generate;
mod settings_roundtrip;
