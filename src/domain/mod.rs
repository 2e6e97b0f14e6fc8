// 領域層：錯誤分類、例程結果，以及例程使用的協作者介面

pub mod model;
pub mod ports;
