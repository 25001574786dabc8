pub mod weex;
