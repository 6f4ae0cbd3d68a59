mod crossing;
mod dispatch;
