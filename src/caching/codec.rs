//! # 타입 태그 직렬화 코덱
//!
//! Spring의 `Jackson2JsonRedisSerializer` + `activateDefaultTyping(NON_FINAL)` 조합과
//! 같은 역할을 수행합니다. 값을 저장할 때 구체 타입의 식별자(타입 태그)를 함께 기록하여,
//! 나중에 읽을 때 구조만 같은 다른 타입이 아닌 원래 타입으로 복원되도록 보장합니다.
//!
//! ## 바이트 레이아웃
//!
//! 복합 값(구조체, 리스트, 맵)은 길이 접두사가 붙은 프레임으로 저장됩니다.
//!
//! ```text
//! ┌──────┬──────────────┬───────────┬────────────────┬──────────────┐
//! │ 0x40 │ tag_len: u16 │ tag UTF-8 │ body_len: u32  │ JSON payload │
//! │ '@'  │ big-endian   │           │ big-endian     │              │
//! └──────┴──────────────┴───────────┴────────────────┴──────────────┘
//! ```
//!
//! 스칼라(정수, 실수, bool, 문자열)는 Jackson의 final 타입처럼 태그 없이 원시 JSON으로
//! 저장됩니다. 그래서 `set("counter", &5i64)` 후 저장소의 `INCRBY`가 그대로 동작합니다.
//! JSON 텍스트는 `@`로 시작할 수 없으므로 두 형식은 첫 바이트로 구분됩니다.
//!
//! ## 스키마 진화
//!
//! - 알 수 없는 필드는 무시합니다 (`FAIL_ON_UNKNOWN_PROPERTIES = false`와 동일)
//! - 기본값/빈 값도 항상 모든 필드를 기록합니다 (`JsonInclude.ALWAYS`와 동일)
//! - 필드가 하나도 없는 객체도 정상 값입니다 (`FAIL_ON_EMPTY_BEANS = false`와 동일)
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use serde::{Deserialize, Serialize};
//! use cache_facade::cache_value;
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Order { id: u64 }
//! cache_value!(Order => "shop.Order");
//!
//! let codec = TaggedJsonCodec;
//! let bytes = codec.encode(&Order { id: 7 })?;
//! let order: Order = codec.decode(&bytes)?;
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, de::DeserializeOwned};

use crate::errors::CodecError;

/// 태그 프레임의 시작 바이트
const FRAME_MAGIC: u8 = b'@';

/// 프레임 헤더 크기: magic(1) + tag_len(2)
const TAG_HEADER_LEN: usize = 3;

/// body 길이 필드 크기
const BODY_LEN_LEN: usize = 4;

/// 캐시에 저장 가능한 값
///
/// 모든 캐시 값은 고유한 타입 태그를 가져야 합니다. 태그는 저장된 바이트에 기록되어
/// 역직렬화 시 요청한 타입과 일치하는지 검증하는 데 사용됩니다.
///
/// 사용자 정의 타입은 [`cache_value!`](crate::cache_value) 매크로로 구현하는 것을 권장합니다.
pub trait CacheValue: Serialize + DeserializeOwned + Send + Sync {
    /// 저장 형식에 기록되는 타입 식별자
    fn type_tag() -> Cow<'static, str>;

    /// `true`이면 태그 프레임 없이 원시 JSON으로 저장합니다.
    fn is_scalar() -> bool {
        false
    }
}

/// 사용자 정의 타입에 [`CacheValue`]를 구현합니다.
///
/// 태그는 저장소에 영구히 남으므로 리팩터링과 무관한 안정적인 이름을 사용하세요.
///
/// ```rust,ignore
/// cache_value!(User => "redis_demo.User");
/// ```
#[macro_export]
macro_rules! cache_value {
    ($ty:ty => $tag:expr) => {
        impl $crate::caching::codec::CacheValue for $ty {
            fn type_tag() -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed($tag)
            }
        }
    };
}

macro_rules! scalar_cache_value {
    ($($ty:ty => $tag:expr),* $(,)?) => {
        $(
            impl CacheValue for $ty {
                fn type_tag() -> Cow<'static, str> {
                    Cow::Borrowed($tag)
                }

                fn is_scalar() -> bool {
                    true
                }
            }
        )*
    };
}

scalar_cache_value! {
    bool => "bool",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    String => "string",
}

impl<T: CacheValue> CacheValue for Vec<T> {
    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("list<{}>", T::type_tag()))
    }
}

impl<T: CacheValue> CacheValue for HashMap<String, T> {
    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("map<string,{}>", T::type_tag()))
    }
}

impl<T: CacheValue> CacheValue for BTreeMap<String, T> {
    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("map<string,{}>", T::type_tag()))
    }
}

/// 타입 태그와 페이로드를 함께 보관하는 디코딩 결과
///
/// 서로 다른 타입의 값이 섞인 해시를 읽을 때처럼, 호출 시점에 구체 타입을
/// 알 수 없는 경우 사용합니다. [`TypedValue::downcast`]로 원래 타입을 복원합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    tag: Option<String>,
    payload: serde_json::Value,
}

impl TypedValue {
    /// 저장된 타입 태그. 스칼라 값이면 `None`입니다.
    pub fn type_tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// 이 값이 `T`로 저장되었는지 확인합니다.
    pub fn is<T: CacheValue>(&self) -> bool {
        match &self.tag {
            Some(tag) => *tag == T::type_tag(),
            None => T::is_scalar() && serde_json::from_value::<T>(self.payload.clone()).is_ok(),
        }
    }

    /// 원래 타입으로 복원합니다.
    ///
    /// # Errors
    ///
    /// * `CodecError::TypeMismatch` - 태그가 `T`와 다름
    /// * `CodecError::Deserialize` - 페이로드가 `T`의 형태가 아님
    pub fn downcast<T: CacheValue>(self) -> Result<T, CodecError> {
        match &self.tag {
            Some(tag) if *tag != T::type_tag() => {
                return Err(CodecError::TypeMismatch {
                    expected: T::type_tag().into_owned(),
                    found: tag.clone(),
                });
            }
            None if !T::is_scalar() => {
                return Err(CodecError::TypeMismatch {
                    expected: T::type_tag().into_owned(),
                    found: "scalar".to_string(),
                });
            }
            _ => {}
        }
        serde_json::from_value(self.payload).map_err(|e| CodecError::Deserialize(e.to_string()))
    }
}

/// 교체 가능한 직렬화 코덱
///
/// 파사드는 이 trait에만 의존하므로, 다른 형식(MessagePack 등)의 코덱으로 교체할 수 있습니다.
/// 구현체는 `decode(encode(v)) == v`와 구체 타입 보존을 만족해야 합니다.
pub trait Codec: Send + Sync {
    fn encode<T: CacheValue>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    fn decode<T: CacheValue>(&self, bytes: &[u8]) -> Result<T, CodecError>;

    /// 구체 타입을 지정하지 않고 태그와 페이로드를 읽습니다.
    fn decode_any(&self, bytes: &[u8]) -> Result<TypedValue, CodecError>;
}

/// 기본 코덱: 길이 접두사 + 타입 태그 + JSON 페이로드
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedJsonCodec;

impl TaggedJsonCodec {
    fn write_frame(tag: &str, body: &[u8]) -> Result<Vec<u8>, CodecError> {
        let tag_len = u16::try_from(tag.len())
            .map_err(|_| CodecError::Serialize(format!("type tag too long: {} bytes", tag.len())))?;
        let body_len = u32::try_from(body.len())
            .map_err(|_| CodecError::Serialize(format!("payload too large: {} bytes", body.len())))?;

        let mut frame = Vec::with_capacity(TAG_HEADER_LEN + tag.len() + BODY_LEN_LEN + body.len());
        frame.push(FRAME_MAGIC);
        frame.extend_from_slice(&tag_len.to_be_bytes());
        frame.extend_from_slice(tag.as_bytes());
        frame.extend_from_slice(&body_len.to_be_bytes());
        frame.extend_from_slice(body);
        Ok(frame)
    }

    /// 프레임을 (태그, body)로 분리합니다. 길이 필드가 실제 크기와 맞지 않으면 실패합니다.
    fn read_frame(bytes: &[u8]) -> Result<(&str, &[u8]), CodecError> {
        if bytes.len() < TAG_HEADER_LEN {
            return Err(CodecError::Malformed("truncated frame header".to_string()));
        }
        let tag_len = u16::from_be_bytes([bytes[1], bytes[2]]) as usize;
        let tag_end = TAG_HEADER_LEN + tag_len;
        let body_start = tag_end + BODY_LEN_LEN;
        if bytes.len() < body_start {
            return Err(CodecError::Malformed("truncated type tag".to_string()));
        }

        let tag = std::str::from_utf8(&bytes[TAG_HEADER_LEN..tag_end])
            .map_err(|e| CodecError::Malformed(format!("type tag is not UTF-8: {}", e)))?;
        let body_len = u32::from_be_bytes([
            bytes[tag_end],
            bytes[tag_end + 1],
            bytes[tag_end + 2],
            bytes[tag_end + 3],
        ]) as usize;

        let body = &bytes[body_start..];
        if body.len() != body_len {
            return Err(CodecError::Malformed(format!(
                "payload length mismatch: header says {}, got {}",
                body_len,
                body.len()
            )));
        }
        Ok((tag, body))
    }
}

impl Codec for TaggedJsonCodec {
    fn encode<T: CacheValue>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let body = serde_json::to_vec(value).map_err(|e| CodecError::Serialize(e.to_string()))?;
        // NaN/±Infinity는 JSON에서 null로 바뀌므로, 다시 읽을 수 없는 값은 저장 전에 거부합니다.
        serde_json::from_slice::<T>(&body).map_err(|e| {
            CodecError::Serialize(format!("value cannot be restored from JSON (non-finite float?): {}", e))
        })?;
        if T::is_scalar() {
            return Ok(body);
        }
        Self::write_frame(&T::type_tag(), &body)
    }

    fn decode<T: CacheValue>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        match bytes.first() {
            None => Err(CodecError::Malformed("empty payload".to_string())),
            Some(&FRAME_MAGIC) => {
                let (tag, body) = Self::read_frame(bytes)?;
                let expected = T::type_tag();
                if tag != expected {
                    return Err(CodecError::TypeMismatch {
                        expected: expected.into_owned(),
                        found: tag.to_string(),
                    });
                }
                serde_json::from_slice(body).map_err(|e| CodecError::Deserialize(e.to_string()))
            }
            Some(_) if T::is_scalar() => {
                serde_json::from_slice(bytes).map_err(|e| CodecError::Deserialize(e.to_string()))
            }
            Some(_) => Err(CodecError::TypeMismatch {
                expected: T::type_tag().into_owned(),
                found: "scalar".to_string(),
            }),
        }
    }

    fn decode_any(&self, bytes: &[u8]) -> Result<TypedValue, CodecError> {
        match bytes.first() {
            None => Err(CodecError::Malformed("empty payload".to_string())),
            Some(&FRAME_MAGIC) => {
                let (tag, body) = Self::read_frame(bytes)?;
                let payload = serde_json::from_slice(body)
                    .map_err(|e| CodecError::Deserialize(e.to_string()))?;
                Ok(TypedValue { tag: Some(tag.to_string()), payload })
            }
            Some(_) => {
                let payload = serde_json::from_slice(bytes)
                    .map_err(|e| CodecError::Malformed(e.to_string()))?;
                Ok(TypedValue { tag: None, payload })
            }
        }
    }
}
