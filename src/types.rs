// src/types.rs
use crate::telemetry::Frame;

// GUI 发给后台的命令
#[derive(Clone, Debug)]
pub enum GuiCommand {
    StartStream,
    StopStream,
    SetInterval(u64),
}

// 后台发给 GUI 的消息
#[derive(Clone, Debug)]
pub enum EngineMessage {
    Log(String),
    Status(bool),  // 数据流状态
    Frame(Frame),
}
