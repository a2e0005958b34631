// Infrastructure adapters: everything that touches the outside world

pub mod workbook;
